//! 配線: 標準アダプタで ChatUseCase を組み立てる
//!
//! 設定は「CLI > 環境変数 > config.json > 既定値」の順に重ねる。

use std::sync::Arc;

use common::adapter::{
    FileJsonLog, StderrLog, StdEnvResolver, StdFileSystem, TeeLog, UuidIdGenerator,
};
use common::domain::HomeDir;
use common::error::Error;
use common::ports::outbound::{EnvResolver, FileSystem, IdGenerator, Log, LogLevel, LogRecord};

use crate::adapter::{load_config_file, ConfigFile, FileSessionIdStore, HttpChatTransport, TerminalView};
use crate::cli::Config;
use crate::domain::ChatSettings;
use crate::ports::outbound::{ChatTransport, SessionIdStore};
use crate::usecase::ChatUseCase;

/// 配線で組み立てたもの（main の ChatCommand ディスパッチで利用）
pub struct App {
    pub chat: ChatUseCase,
    /// 構造化ログ（ファイルへ JSONL。-v のときは stderr にも）
    pub logger: Arc<dyn Log>,
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_chat(config: &Config) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver = StdEnvResolver;
    let home = env_resolver.resolve_home_dir()?;
    let logger = build_logger(&fs, &home, config.verbose);

    let file = load_config_file(fs.as_ref(), &home)?;
    let settings = resolve_settings(config, file, env_resolver.base_url_override());
    let _ = logger.log(
        &LogRecord::new(LogLevel::Debug, "settings resolved")
            .layer("wiring")
            .kind("config")
            .field("home", home.display().to_string())
            .field("base_url", settings.base_url.as_str())
            .field("top_k", settings.top_k)
            .field("framing", settings.framing.as_str()),
    );

    let id_gen: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
    let store = FileSessionIdStore::new(Arc::clone(&fs), id_gen, home.session_id_file());
    let session_id = store.load_or_create()?;

    let transport: Arc<dyn ChatTransport> = Arc::new(HttpChatTransport::new(
        &settings.base_url,
        settings.timeout_secs,
        Arc::clone(&logger),
    )?);
    let view = Box::new(TerminalView::stdio());
    let chat = ChatUseCase::new(transport, view, Arc::clone(&logger), session_id, &settings);
    Ok(App { chat, logger })
}

/// ファイルへは通常 Info まで。-v のときは Debug もファイルと stderr に出す
fn build_logger(fs: &Arc<dyn FileSystem>, home: &HomeDir, verbose: bool) -> Arc<dyn Log> {
    let level = if verbose { LogLevel::Debug } else { LogLevel::Info };
    let file: Arc<dyn Log> =
        Arc::new(FileJsonLog::new(Arc::clone(fs), home.log_file()).with_max_level(level));
    if verbose {
        let stderr: Arc<dyn Log> = Arc::new(StderrLog::new(LogLevel::Debug));
        Arc::new(TeeLog::new(vec![file, stderr]))
    } else {
        file
    }
}

/// 既定値に config.json・環境変数・CLI の順で上書きする
fn resolve_settings(config: &Config, file: ConfigFile, env_base_url: Option<String>) -> ChatSettings {
    let mut settings = ChatSettings::default();
    file.apply_to(&mut settings);
    if let Some(url) = env_base_url {
        settings.base_url = url;
    }
    if let Some(url) = &config.base_url {
        settings.base_url = url.clone();
    }
    if let Some(k) = config.top_k {
        settings.top_k = k;
    }
    if let Some(f) = config.framing {
        settings.framing = f;
    }
    settings
}
