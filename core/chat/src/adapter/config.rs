//! 設定ファイル（<home>/config.json）の読み込み（adapter 層）
//!
//! すべてのキーは省略可能。ファイルが無ければ既定値のまま。壊れていれば Error::Json。

use crate::domain::{ChatSettings, Framing};
use common::domain::HomeDir;
use common::error::Error;
use common::ports::outbound::FileSystem;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub top_k: Option<u32>,
    pub framing: Option<Framing>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// 指定のあるキーだけ settings を上書きする
    pub fn apply_to(self, settings: &mut ChatSettings) {
        if let Some(url) = self.base_url {
            settings.base_url = url;
        }
        if let Some(k) = self.top_k {
            settings.top_k = k;
        }
        if let Some(f) = self.framing {
            settings.framing = f;
        }
        if self.timeout_secs.is_some() {
            settings.timeout_secs = self.timeout_secs;
        }
    }
}

pub fn load_config_file(fs: &dyn FileSystem, home: &HomeDir) -> Result<ConfigFile, Error> {
    let path = home.config_file();
    if !fs.exists(&path) {
        return Ok(ConfigFile::default());
    }
    let content = fs.read_to_string(&path)?;
    let file: ConfigFile = serde_json::from_str(&content)
        .map_err(|e| Error::json(format!("Invalid config {}: {}", path.display(), e)))?;
    if file.top_k == Some(0) {
        return Err(Error::invalid_argument(format!(
            "Invalid config {}: top_k must be at least 1",
            path.display()
        )));
    }
    if file.timeout_secs == Some(0) {
        return Err(Error::invalid_argument(format!(
            "Invalid config {}: timeout_secs must be at least 1 (omit it for no timeout)",
            path.display()
        )));
    }
    Ok(file)
}
