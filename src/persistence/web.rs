//! Browser LocalStorage store (wasm32 only)

use super::{BEST_SCORE_KEY, BestScoreStore};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl BestScoreStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(BEST_SCORE_KEY)
            .map_err(|_| StoreError::Unavailable)
    }

    fn write(&mut self, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(BEST_SCORE_KEY, value)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }
}
