//! セッション ID をホームディレクトリのファイルに保存する SessionIdStore 実装

use crate::domain::SessionId;
use crate::ports::outbound::SessionIdStore;
use common::error::Error;
use common::ports::outbound::{FileSystem, IdGenerator};
use std::path::PathBuf;
use std::sync::Arc;

pub struct FileSessionIdStore {
    fs: Arc<dyn FileSystem>,
    ids: Arc<dyn IdGenerator>,
    path: PathBuf,
}

impl FileSessionIdStore {
    pub fn new(fs: Arc<dyn FileSystem>, ids: Arc<dyn IdGenerator>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            ids,
            path: path.into(),
        }
    }
}

impl SessionIdStore for FileSessionIdStore {
    fn load_or_create(&self) -> Result<SessionId, Error> {
        if self.fs.exists(&self.path) {
            let saved = self.fs.read_to_string(&self.path)?;
            // 空ファイルは未作成とみなして作り直す
            if let Ok(id) = SessionId::parse(&saved) {
                return Ok(id);
            }
        }

        let id = SessionId::parse(&self.ids.next_id())?;
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        self.fs.write(&tmp, &format!("{}\n", id))?;
        self.fs.rename(&tmp, &self.path)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SeqIds(AtomicUsize);

    impl IdGenerator for SeqIds {
        fn next_id(&self) -> String {
            format!("id-{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn store(path: PathBuf) -> FileSessionIdStore {
        FileSessionIdStore::new(Arc::new(StdFileSystem), Arc::new(SeqIds(AtomicUsize::new(1))), path)
    }

    #[test]
    fn test_creates_once_then_reuses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home").join("session_id");
        let s = store(path.clone());

        let first = s.load_or_create().unwrap();
        assert_eq!(&*first, "id-1");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id-1\n");
        assert!(!path.with_extension("tmp").exists());

        let again = s.load_or_create().unwrap();
        assert_eq!(again, first);
    }

    #[test]
    fn test_existing_value_is_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session_id");
        std::fs::write(&path, "3f0c-saved\n").unwrap();
        assert_eq!(&*store(path).load_or_create().unwrap(), "3f0c-saved");
    }

    #[test]
    fn test_blank_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session_id");
        std::fs::write(&path, "  \n").unwrap();
        let id = store(path.clone()).load_or_create().unwrap();
        assert_eq!(&*id, "id-1");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id-1\n");
    }
}
