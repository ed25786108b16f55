//! Best-score persistence
//!
//! The best score is one integer stored as a decimal string under
//! [`BEST_SCORE_KEY`]. Backends:
//! - [`MemoryStore`]: in-process, shareable handle (tests, embedding)
//! - [`FileStore`]: JSON file keyed by namespaced keys (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//!
//! Absent or malformed values load as zero; they are never fatal.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::StoreError;

pub use crate::consts::BEST_SCORE_KEY;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Read/write capability for the raw stored best-score value
pub trait BestScoreStore {
    /// Raw stored value, `None` if nothing was ever written
    fn read(&self) -> Result<Option<String>, StoreError>;
    /// Replace the stored value
    fn write(&mut self, value: &str) -> Result<(), StoreError>;
}

/// Parse a stored value; absent means zero
pub fn parse_best(raw: Option<&str>) -> Result<u32, StoreError> {
    match raw {
        None => Ok(0),
        Some(value) => value.trim().parse::<u32>().map_err(|_| StoreError::Malformed {
            value: value.to_string(),
        }),
    }
}

/// Load the best score, falling back to zero on any failure
pub fn load_best(store: &dyn BestScoreStore) -> u32 {
    match store.read().and_then(|raw| parse_best(raw.as_deref())) {
        Ok(best) => {
            log::info!("Loaded best score {}", best);
            best
        }
        Err(e) => {
            log::warn!("Best score unavailable ({}), starting from 0", e);
            0
        }
    }
}

/// Persist a new best score
pub fn save_best(store: &mut dyn BestScoreStore, best: u32) -> Result<(), StoreError> {
    store.write(&best.to_string())?;
    log::info!("Best score saved ({})", best);
    Ok(())
}

#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<String>,
    fail_writes: bool,
}

/// In-memory store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<MemorySlot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw value (possibly malformed)
    pub fn with_raw(value: &str) -> Self {
        let store = Self::default();
        store.slot.borrow_mut().value = Some(value.to_string());
        store
    }

    /// Current raw value
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().value.clone()
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self) {
        self.slot.borrow_mut().fail_writes = true;
    }
}

impl BestScoreStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.borrow().value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), StoreError> {
        let mut slot = self.slot.borrow_mut();
        if slot.fail_writes {
            return Err(StoreError::Rejected("quota exceeded".to_string()));
        }
        slot.value = Some(value.to_string());
        Ok(())
    }
}
