//! ドメイン型（Newtype）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

use std::path::{Path, PathBuf};

/// クライアントのホームディレクトリ（設定・ログ・セッション ID の置き場所）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// 設定ファイル（config.json）のパス
    pub fn config_file(&self) -> PathBuf {
        self.0.join("config.json")
    }

    /// セッション ID を保存するファイル（キー名 session_id）
    pub fn session_id_file(&self) -> PathBuf {
        self.0.join("session_id")
    }

    /// JSONL ログのパス
    pub fn log_file(&self) -> PathBuf {
        self.0.join("logs").join("chat.jsonl")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}
