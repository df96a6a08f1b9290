//! エラーハンドリング
//!
//! 全レイヤーで共通のエラー型。`main` で終了コード（sysexits 準拠）に変換する。

/// エラー型
///
/// メッセージはそのまま stderr に出せる形で保持する。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// ファイル I/O の失敗
    #[error("{0}")]
    Io(String),
    /// JSON のシリアライズ・パース失敗
    #[error("{0}")]
    Json(String),
    /// ネットワーク失敗・非 2xx 応答・ボディ欠落
    #[error("{0}")]
    Http(String),
    /// 引数・入力の不正（使い方の誤り）
    #[error("{0}")]
    InvalidArgument(String),
    /// 環境変数・設定ディレクトリの解決失敗
    #[error("{0}")]
    Env(String),
    /// その他の内部エラー
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Io(_) | Error::Json(_) | Error::Http(_) => 74,
            Error::Env(_) => 78,
            Error::System(_) => 70,
        }
    }

    /// 使い方の誤りか（main で Usage を表示する）
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
