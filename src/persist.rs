//! Persistence
//!
//! The store holds exactly one `PlayerState` record, written in full after
//! every mutation. JSON on disk for real hosts, an in-memory slot for tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::EconomyError;
use crate::state::{PlayerState, SCHEMA_VERSION};

/// Load/save access to the persisted player record
pub trait StateStore {
    /// Load the saved record, if one exists
    fn load(&self) -> Result<Option<PlayerState>, EconomyError>;

    /// Persist the full record
    fn save(&self, state: &PlayerState) -> Result<(), EconomyError>;
}

/// Reject records written by a newer crate version rather than silently
/// dropping fields they may contain.
fn check_version(state: &PlayerState) -> Result<(), EconomyError> {
    if state.schema_version > SCHEMA_VERSION {
        return Err(EconomyError::Persistence(format!(
            "saved record has schema version {} but this build supports up to {}",
            state.schema_version, SCHEMA_VERSION
        )));
    }
    Ok(())
}

// ============================================================================
// JSON File Store
// ============================================================================

/// Store backed by a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<PlayerState>, EconomyError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| EconomyError::Persistence(format!("read {:?}: {}", self.path, e)))?;
        let state: PlayerState = serde_json::from_str(&raw)
            .map_err(|e| EconomyError::Persistence(format!("parse {:?}: {}", self.path, e)))?;

        check_version(&state)?;
        info!("Loaded player record from {:?}", self.path);
        Ok(Some(state))
    }

    fn save(&self, state: &PlayerState) -> Result<(), EconomyError> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| EconomyError::Persistence(format!("serialize: {}", e)))?;
        std::fs::write(&self.path, json)
            .map_err(|e| EconomyError::Persistence(format!("write {:?}: {}", self.path, e)))
    }
}

// ============================================================================
// In-Memory Store
// ============================================================================

/// Store holding the record in memory (tests and embedded hosts)
#[derive(Default)]
pub struct MemoryStore {
    slot: RefCell<Option<PlayerState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a record, as if it had been saved by a previous session
    pub fn with_state(state: PlayerState) -> Self {
        Self {
            slot: RefCell::new(Some(state)),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<PlayerState>, EconomyError> {
        let slot = self.slot.borrow();
        if let Some(state) = slot.as_ref() {
            check_version(state)?;
        }
        Ok(slot.clone())
    }

    fn save(&self, state: &PlayerState) -> Result<(), EconomyError> {
        *self.slot.borrow_mut() = Some(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(&temp.path().join("player.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(&temp.path().join("player.json"));

        let mut state = PlayerState::default();
        state.coins = 480;
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.coins, 480);
    }

    #[test]
    fn newer_schema_versions_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("player.json");
        std::fs::write(&path, format!(r#"{{"schema_version": {}}}"#, SCHEMA_VERSION + 1)).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(EconomyError::Persistence(_))));
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let state = PlayerState::default();
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap().unwrap().coins, state.coins);
    }
}
