//! Log ポートの実装群
//!
//! - FileJsonLog: ファイルへ JSONL で追記（通常の出力先）
//! - StderrLog: -v 指定時に要点だけ stderr へ出す
//! - TeeLog: 複数の Log へ同じレコードを流す
//! - NoopLog / MemoryLog: テスト用

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// ファイルへ JSONL を追記する Log 実装（既定では Info まで。Debug は with_max_level で有効にする）
pub struct FileJsonLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    max_level: LogLevel,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
            max_level: LogLevel::Info,
        }
    }

    pub fn with_max_level(mut self, max_level: LogLevel) -> Self {
        self.max_level = max_level;
        self
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level > self.max_level {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let mut w = self.fs.open_append(&self.path)?;
        let line = serde_json::to_string(record).map_err(|e| Error::Json(e.to_string()))?;
        w.write_all(line.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.write_all(b"\n")
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// stderr へ 1 行で出す Log 実装（max_level より詳細なレコードは捨てる）
pub struct StderrLog {
    max_level: LogLevel,
}

impl StderrLog {
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }
}

/// stderr 用の 1 行表現（fields は JSON のまま末尾に付ける）
fn format_line(record: &LogRecord) -> String {
    let level = match record.level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    };
    let mut line = format!("[{}] {}", level, record.message);
    if let Some(ref kind) = record.kind {
        line = format!("[{}] ({}) {}", level, kind, record.message);
    }
    if let Some(ref fields) = record.fields {
        if let Ok(s) = serde_json::to_string(fields) {
            line.push(' ');
            line.push_str(&s);
        }
    }
    line
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level > self.max_level {
            return Ok(());
        }
        eprintln!("{}", format_line(record));
        Ok(())
    }
}

/// 複数の Log へ順に書き出す。最初に失敗したエラーを返すが、残りへの書き出しは続ける。
pub struct TeeLog {
    sinks: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(sinks: Vec<Arc<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 何も出力しない Log 実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

/// メモリに溜める Log 実装（テストでログ内容を検証する用）
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// kind が一致するレコードのメッセージ一覧
    pub fn messages_of_kind(&self, kind: &str) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.kind.as_deref() == Some(kind))
            .map(|r| r.message)
            .collect()
    }
}

impl Log for MemoryLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| Error::system("log buffer poisoned"))?;
        records.push(record.clone());
        Ok(())
    }
}
