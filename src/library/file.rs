use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::library::KvStore;

/// File-backed key-value store: one JSON file per key
///
/// The directory is created on first write. Reads validate the stored blob
/// against the requested type; a corrupt blob is reported as a storage
/// error naming the key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KvStore for JsonFileStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let path = self.blob_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read blob for key '{}': {}",
                    key, e
                )))
            }
        };

        let value = serde_json::from_str(&raw).map_err(|e| {
            AppError::Storage(format!("Corrupt blob for key '{}': {}", key, e))
        })?;
        Ok(Some(value))
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Storage(format!(
                "Failed to create library directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.blob_path(key), raw).map_err(|e| {
            AppError::Storage(format!("Failed to write blob for key '{}': {}", key, e))
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove blob for key '{}': {}",
                key, e
            ))),
        }
    }
}
