//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::HomeDir;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        resolve_home_dir_with(|name| env::var(name).ok())
    }

    fn base_url_override(&self) -> Option<String> {
        non_empty(env::var("CHAT_BASE_URL").ok())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// 変数の取得方法を差し替えてホームディレクトリを解決する（テスト用に分離）
pub(crate) fn resolve_home_dir_with<F>(lookup: F) -> Result<HomeDir, Error>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(home) = non_empty(lookup("CHAT_HOME")) {
        return Ok(HomeDir::new(PathBuf::from(home)));
    }

    let config_base = non_empty(lookup("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| non_empty(lookup("HOME")).map(|h| PathBuf::from(h).join(".config")))
        .ok_or_else(|| Error::env("HOME is not set"))?;

    Ok(HomeDir::new(config_base.join("newschat")))
}
