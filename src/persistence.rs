//! Best-ever legacy record storage
//!
//! The only persisted state. The file is a JSON object with a single key so
//! it can sit alongside other settings later without a format change.

use crate::core::error::{PoliticsError, Result};
use crate::state::legacy::LegacyRecord;
use ahash::AHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const LEGACY_KEY: &str = "pp_legacy_best";

pub trait LegacyStore: Send {
    /// Read the stored record; `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<LegacyRecord>>;

    fn save(&mut self, record: &LegacyRecord) -> Result<()>;
}

/// Stores the record in a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileLegacyStore {
    path: PathBuf,
}

impl JsonFileLegacyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LegacyStore for JsonFileLegacyStore {
    fn load(&self) -> Result<Option<LegacyRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let mut entries: AHashMap<String, LegacyRecord> = serde_json::from_str(&content)?;
        Ok(entries.remove(LEGACY_KEY))
    }

    fn save(&mut self, record: &LegacyRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut entries = AHashMap::new();
        entries.insert(LEGACY_KEY.to_string(), record.clone());
        let json = serde_json::to_string_pretty(&entries)?;

        // Write then rename so a crash never leaves a half-written record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            PoliticsError::PersistenceError(format!(
                "failed to move record into {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// In-process store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryLegacyStore {
    slot: Arc<Mutex<Option<LegacyRecord>>>,
}

impl MemoryLegacyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LegacyStore for MemoryLegacyStore {
    fn load(&self) -> Result<Option<LegacyRecord>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| PoliticsError::PersistenceError("legacy slot poisoned".into()))?;
        Ok(slot.clone())
    }

    fn save(&mut self, record: &LegacyRecord) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| PoliticsError::PersistenceError("legacy slot poisoned".into()))?;
        *slot = Some(record.clone());
        Ok(())
    }
}

/// A store that refuses every write
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyLegacyStore;

impl LegacyStore for ReadOnlyLegacyStore {
    fn load(&self) -> Result<Option<LegacyRecord>> {
        Ok(None)
    }

    fn save(&mut self, _record: &LegacyRecord) -> Result<()> {
        Err(PoliticsError::PersistenceError("store is read-only".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::legacy::LegacyTitle;

    #[test]
    fn test_memory_store_shares_slot() {
        let store = MemoryLegacyStore::new();
        let mut writer = store.clone();
        assert!(store.load().unwrap().is_none());
        writer
            .save(&LegacyRecord {
                best_index: 72.5,
                best_title: Some(LegacyTitle::RespectedStatesman),
            })
            .unwrap();
        assert_eq!(store.load().unwrap().map(|r| r.best_index), Some(72.5));
    }

    #[test]
    fn test_read_only_store_fails_writes() {
        let mut store = ReadOnlyLegacyStore;
        assert!(matches!(
            store.save(&LegacyRecord::default()),
            Err(PoliticsError::PersistenceError(_))
        ));
    }
}
