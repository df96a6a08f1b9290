//! Outbound ポート: アプリが外界（FS・環境変数・ログ・ID 生成）を使うための trait

pub mod env_resolver;
pub mod fs;
pub mod id_generator;
pub mod log;

pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use id_generator::IdGenerator;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
