//! File-backed store for native builds
//!
//! The file is a flat JSON object of namespaced keys to string values, the
//! same shape a browser's LocalStorage exposes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{BEST_SCORE_KEY, BestScoreStore};
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let json = String::from_utf8(bytes).map_err(|e| StoreError::Malformed {
            value: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })?;
        serde_json::from_str(&json).map_err(|_| StoreError::Malformed { value: json })
    }
}

impl BestScoreStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(BEST_SCORE_KEY))
    }

    fn write(&mut self, value: &str) -> Result<(), StoreError> {
        // Keep unrelated keys; only a corrupt file is replaced
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StoreError::Malformed { value }) => {
                log::warn!("Replacing corrupt store {} ({} bytes)", self.path.display(), value.len());
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(BEST_SCORE_KEY.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
