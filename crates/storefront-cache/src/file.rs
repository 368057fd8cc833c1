//! Directory-backed store: one file per key.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{CacheError, KvStore};

const EXTENSION: &str = "json";

/// Key-Value backend persisting each key to `<dir>/<percent-encoded key>.json`.
///
/// Writes go to a temp file in the same directory and are persisted over the
/// target, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", urlencoding::encode(key), EXTENSION))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);
        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| io_error("write", &self.dir, e))?;
        tmp.write_all(value).map_err(|e| io_error("write", tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| io_error("persist", &path, e.error))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("delete", &path, e)),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key).is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| io_error("list", &self.dir, e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error("list", &self.dir, e))?.path();
            if path.extension().map_or(false, |ext| ext == EXTENSION) {
                if let Some(key) = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| urlencoding::decode(stem).ok())
                {
                    keys.push(key.into_owned());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn io_error(op: &str, path: &Path, e: std::io::Error) -> CacheError {
    CacheError::StoreError(format!("{} {}: {}", op, path.display(), e))
}
