use std::path::PathBuf;

use tempfile::TempDir;

use thai_flashcards::constants::DEFAULT_STORAGE_QUOTA_BYTES;
use thai_flashcards::session::{LoadStatus, StudySession};
use thai_flashcards::store::Store;

/// A session backed by a throwaway sled directory that can be reopened to
/// check what survived.
pub struct TestSession {
    pub session: StudySession,
    pub status: LoadStatus,
    sled_path: PathBuf,
    quota_bytes: usize,
    _temp_dir: TempDir,
}

impl TestSession {
    pub fn open() -> Self {
        Self::open_with_quota(DEFAULT_STORAGE_QUOTA_BYTES)
    }

    pub fn open_with_quota(quota_bytes: usize) -> Self {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let sled_path = temp_dir.path().join("flashcards-test.sled");
        let store = open_store(&sled_path, quota_bytes);
        let (session, status) = StudySession::load(store);
        Self {
            session,
            status,
            sled_path,
            quota_bytes,
            _temp_dir: temp_dir,
        }
    }

    /// Drops the current session and loads a new one from the same directory.
    pub fn reopen(self) -> Self {
        self.reopen_after(|_| {})
    }

    /// Like `reopen`, but lets the caller change the raw store in between,
    /// the way another program or a damaged disk would.
    pub fn reopen_after(self, edit: impl FnOnce(&Store)) -> Self {
        let Self {
            session,
            sled_path,
            quota_bytes,
            _temp_dir,
            ..
        } = self;
        let store = session.into_store();
        edit(&store);
        store.flush().expect("flush before reopen");
        drop(store);

        let store = open_store(&sled_path, quota_bytes);
        let (session, status) = StudySession::load(store);
        Self {
            session,
            status,
            sled_path,
            quota_bytes,
            _temp_dir,
        }
    }
}

fn open_store(path: &std::path::Path, quota_bytes: usize) -> Store {
    let store = Store::open(path.to_str().expect("utf-8 path"), quota_bytes).expect("open store");
    store.run_migrations().expect("migrations");
    store
}
