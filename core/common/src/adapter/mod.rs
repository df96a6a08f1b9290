//! アダプター（外界の I/O を trait で抽象化した標準実装）
//!
//! usecase は ports::outbound の trait 経由でのみファイル・環境変数・ログに触れる。
//! 実装は標準実装（Std*）やテスト用のモックを注入する。

pub mod file_json_log;
pub mod std_env_resolver;
pub mod std_fs;
pub mod std_id_generator;

pub use file_json_log::{FileJsonLog, MemoryLog, NoopLog, StderrLog, TeeLog};
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use std_id_generator::UuidIdGenerator;
