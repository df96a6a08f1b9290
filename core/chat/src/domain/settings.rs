//! 接続設定（解決済みの値）
//!
//! config.json・環境変数・CLI フラグを wiring で重ねた結果を保持する。

use common::error::Error;
use serde::Deserialize;

/// 既定のバックエンド（FastAPI の /chat ルーター）
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/chat";

/// 既定の検索件数（バックエンドにそのまま渡す）
pub const DEFAULT_TOP_K: u32 = 3;

/// 返信ストリームの区切り方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    /// バッファが `{` で始まり `}` で終わったらパースを試みる
    #[default]
    Heuristic,
    /// 文字列・エスケープを考慮して波括弧の深さを数え、閉じた時点でパースする
    #[serde(alias = "brace-depth")]
    BraceDepth,
}

impl Framing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framing::Heuristic => "heuristic",
            Framing::BraceDepth => "brace_depth",
        }
    }
}

impl std::str::FromStr for Framing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heuristic" => Ok(Framing::Heuristic),
            "brace_depth" | "brace-depth" => Ok(Framing::BraceDepth),
            other => Err(Error::invalid_argument(format!(
                "Unknown framing: {}. Supported: heuristic, brace_depth",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    pub base_url: String,
    pub top_k: u32,
    pub framing: Framing,
    /// リクエスト全体のタイムアウト。None のときストリームは終わるまで待つ。
    pub timeout_secs: Option<u64>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            top_k: DEFAULT_TOP_K,
            framing: Framing::default(),
            timeout_secs: None,
        }
    }
}
