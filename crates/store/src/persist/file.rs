//! File-backed persistence: one JSON file per key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::Persister;

/// Errors raised by [`FileStore`].
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// Filesystem operation failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Keys become file names, so they are restricted to `[A-Za-z0-9_-]`.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// A [`Persister`] that stores each key in `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory first and are then
/// renamed over the target, so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a data directory.
    ///
    /// # Errors
    ///
    /// Returns `FileStoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, FileStoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| FileStoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, FileStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FileStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Persister for FileStore {
    type Error = FileStoreError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FileStoreError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));

        fs::write(&tmp, value).map_err(|source| FileStoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| FileStoreError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(key, bytes = value.len(), path = %path.display(), "Wrote persisted value");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let store = FileStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_read_missing_key_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert_eq!(store.read("cartItems").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        store.write("cartItems", "[]").unwrap();
        store.write("cartItems", "[1]").unwrap();

        assert_eq!(store.read("cartItems").unwrap().as_deref(), Some("[1]"));
        assert!(tmp.path().join("cartItems.json").is_file());
        assert!(!tmp.path().join(".cartItems.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(matches!(
            store.write("../escape", "x"),
            Err(FileStoreError::InvalidKey(_))
        ));
        assert!(matches!(
            store.read(""),
            Err(FileStoreError::InvalidKey(_))
        ));
    }
}
