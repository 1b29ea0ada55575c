//! Injected collaborator capabilities.
//!
//! Persistence, image sourcing and the caller's role are external concerns;
//! the core consumes them through these traits. Each trait ships a real
//! implementation and an in-memory one for tests.

use crate::store::HistoryEntry;
use pagecraft_document::{AdminRole, SiteDocument};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("Storage capacity exceeded")]
    CapacityExceeded,

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Stored snapshot is corrupt: {0}")]
    Corrupt(String),
}

/// Durable storage slot for a document snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Draft,
    Live,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Draft => "draft",
            Slot::Live => "live",
        }
    }
}

/// Durable persistence backend. The [`DocumentStore`](crate::DocumentStore)
/// is the only caller.
pub trait Persistence {
    fn persist(&mut self, slot: Slot, doc: &SiteDocument) -> Result<(), PersistenceError>;

    /// `Ok(None)` means nothing has ever been persisted in that slot.
    fn fetch(&self, slot: Slot) -> Result<Option<SiteDocument>, PersistenceError>;

    fn append_history(&mut self, entry: &HistoryEntry) -> Result<(), PersistenceError>;

    fn list_history(&self) -> Vec<HistoryEntry>;

    /// Remove one history entry by id. Returns whether it existed.
    fn remove_history(&mut self, id: &str) -> bool;

    /// Clear both slots and all history.
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

/// In-memory backend for tests and throwaway sessions.
///
/// Snapshots are held as serialized JSON so tests can inject corrupt data
/// and so fetch always returns an independent copy. Write failures can be
/// injected to exercise the store's degradation path.
#[derive(Default)]
pub struct MemoryPersistence {
    slots: HashMap<Slot, String>,
    history: Vec<HistoryEntry>,
    /// When set, the next N writes fail with `CapacityExceeded`.
    pub failing_writes: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a raw snapshot string (possibly invalid JSON) into a slot.
    pub fn seed_raw(&mut self, slot: Slot, raw: impl Into<String>) {
        self.slots.insert(slot, raw.into());
    }

    fn take_failure(&mut self) -> Result<(), PersistenceError> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(PersistenceError::CapacityExceeded);
        }
        Ok(())
    }
}

impl Persistence for MemoryPersistence {
    fn persist(&mut self, slot: Slot, doc: &SiteDocument) -> Result<(), PersistenceError> {
        self.take_failure()?;
        let raw = serde_json::to_string(doc)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        self.slots.insert(slot, raw);
        Ok(())
    }

    fn fetch(&self, slot: Slot) -> Result<Option<SiteDocument>, PersistenceError> {
        match self.slots.get(&slot) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| PersistenceError::Corrupt(e.to_string())),
        }
    }

    fn append_history(&mut self, entry: &HistoryEntry) -> Result<(), PersistenceError> {
        self.take_failure()?;
        self.history.push(entry.clone());
        Ok(())
    }

    fn list_history(&self) -> Vec<HistoryEntry> {
        self.history.clone()
    }

    fn remove_history(&mut self, id: &str) -> bool {
        let before = self.history.len();
        self.history.retain(|entry| entry.id != id);
        self.history.len() != before
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.slots.clear();
        self.history.clear();
        Ok(())
    }
}

/// File-backed persistence: `draft.json`, `live.json` and `history.json`
/// inside one directory.
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.as_str()))
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join("history.json")
    }

    fn read_history(path: &Path) -> Vec<HistoryEntry> {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn write_history(&self, entries: &[HistoryEntry]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        std::fs::write(self.history_path(), raw)
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))
    }
}

impl Persistence for FilePersistence {
    fn persist(&mut self, slot: Slot, doc: &SiteDocument) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string_pretty(doc)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        std::fs::write(self.slot_path(slot), raw)
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))
    }

    fn fetch(&self, slot: Slot) -> Result<Option<SiteDocument>, PersistenceError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }

    fn append_history(&mut self, entry: &HistoryEntry) -> Result<(), PersistenceError> {
        let mut entries = Self::read_history(&self.history_path());
        entries.push(entry.clone());
        self.write_history(&entries)
    }

    fn list_history(&self) -> Vec<HistoryEntry> {
        Self::read_history(&self.history_path())
    }

    fn remove_history(&mut self, id: &str) -> bool {
        let mut entries = Self::read_history(&self.history_path());
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;
        if removed {
            let _ = self.write_history(&entries);
        }
        removed
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        for path in [
            self.slot_path(Slot::Draft),
            self.slot_path(Slot::Live),
            self.history_path(),
        ] {
            if path.exists() {
                std::fs::remove_file(&path)
                    .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
            }
        }
        Ok(())
    }
}

/// Constraints for an image pick request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageConstraints {
    pub aspect_ratio: Option<f32>,
}

/// "Pick an image, get back a URL." The core never sees raw bytes; uploaded
/// media must resolve to externally hosted URLs.
pub trait ImageSource {
    fn request_image(&mut self, constraints: ImageConstraints) -> Result<String, String>;
}

/// Supplies the current caller's role for permission gating.
pub trait RoleProvider {
    fn current_role(&self) -> AdminRole;
}

/// Fixed-role provider, the common case for a single admin session.
pub struct FixedRole(pub AdminRole);

impl RoleProvider for FixedRole {
    fn current_role(&self) -> AdminRole {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_slots_are_independent() {
        let mut backend = MemoryPersistence::new();
        let doc = SiteDocument::default();
        backend.persist(Slot::Draft, &doc).unwrap();

        assert!(backend.fetch(Slot::Draft).unwrap().is_some());
        assert!(backend.fetch(Slot::Live).unwrap().is_none());
    }

    #[test]
    fn test_injected_write_failure() {
        let mut backend = MemoryPersistence::new();
        backend.failing_writes = 1;
        let doc = SiteDocument::default();

        assert_eq!(
            backend.persist(Slot::Draft, &doc),
            Err(PersistenceError::CapacityExceeded)
        );
        assert!(backend.persist(Slot::Draft, &doc).is_ok());
    }

    #[test]
    fn test_corrupt_snapshot_reported() {
        let mut backend = MemoryPersistence::new();
        backend.seed_raw(Slot::Live, "{not json");
        assert!(matches!(
            backend.fetch(Slot::Live),
            Err(PersistenceError::Corrupt(_))
        ));
    }
}
