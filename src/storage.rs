use crate::Result;
use crate::error::RestpadError;
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::sync::Mutex;

pub const DATA_DIR: &str = ".restpad";
pub const VARIABLES_KEY: &str = "rest-client-variables";
pub const HISTORY_KEY: &str = "rest-client-history";

/// Persistent key/value storage holding whole JSON documents.
///
/// Every collection in this crate is small and rewritten as one unit, so the
/// interface is get/set of the full serialized value. There is no locking
/// across a read-modify-write: two writers racing on the same key end with
/// the last writer's document.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(RestpadError::IoError)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = fs::File::open(&path).map_err(RestpadError::IoError)?;
        // Shared lock so we never observe a half-written document
        file.lock_shared().map_err(RestpadError::IoError)?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(RestpadError::IoError)?;
        Ok(Some(content))
    }

    /// Rewrite the whole document under an exclusive lock.
    ///
    /// Truncates through the locked handle instead of renaming a temp file,
    /// which keeps the lock meaningful on Windows too.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.path_for(key))
            .map_err(RestpadError::IoError)?;

        file.lock_exclusive().map_err(RestpadError::IoError)?;

        file.set_len(0).map_err(RestpadError::IoError)?;
        file.seek(SeekFrom::Start(0))
            .map_err(RestpadError::IoError)?;
        file.write_all(value.as_bytes())
            .map_err(RestpadError::IoError)?;
        file.flush().map_err(RestpadError::IoError)?;

        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| RestpadError::Storage("memory store poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| RestpadError::Storage("memory store poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
