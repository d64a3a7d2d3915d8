//! In-memory table repository for testing.
//!
//! Stores encoded tables in a shared map, avoiding file system I/O entirely.
//! Clones share the same underlying storage, so a test can hand the
//! repository to an agent and still inspect what was saved.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    Result,
    adapters::envelope::SavedTable,
    error::Error,
    ports::TableRepository,
    q_table::QTable,
};

/// In-memory repository for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of tables currently stored; useful for asserting that a
    /// learning update actually triggered a save.
    pub fn count(&self) -> usize {
        self.storage.lock().expect("repository lock poisoned").len()
    }

    /// Whether a table has been saved under `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage
            .lock()
            .expect("repository lock poisoned")
            .contains_key(&key_for(path))
    }

    /// Drop all stored tables.
    pub fn clear(&self) {
        self.storage
            .lock()
            .expect("repository lock poisoned")
            .clear();
    }
}

fn key_for(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl TableRepository for InMemoryRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let saved = SavedTable::from_table(table);
        let bytes = rmp_serde::to_vec(&saved).map_err(|e| Error::Serialization {
            operation: format!("serialize Q-table for {path:?}"),
            message: e.to_string(),
        })?;
        self.storage
            .lock()
            .expect("repository lock poisoned")
            .insert(key_for(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Option<QTable>> {
        let bytes = {
            let storage = self.storage.lock().expect("repository lock poisoned");
            match storage.get(&key_for(path)) {
                Some(bytes) => bytes.clone(),
                None => return Ok(None),
            }
        };
        let saved: SavedTable =
            rmp_serde::from_slice(&bytes).map_err(|e| Error::Serialization {
                operation: format!("deserialize Q-table for {path:?}"),
                message: e.to_string(),
            })?;
        saved.into_table(path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_shared_storage() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();

        let mut table = QTable::zeros(&[2, 2]);
        table.set_value(&[0], &[1], 0.25);

        let path = Path::new("agent/q_move_advanced.msgpack");
        repo.save(&table, path).expect("save failed");

        // The clone sees the same storage.
        assert!(clone.contains(path));
        let loaded = clone.load(path).expect("load failed").expect("no table");
        assert_eq!(loaded, table);
    }

    #[test]
    fn missing_key_is_none() {
        let repo = InMemoryRepository::new();
        let loaded = repo.load(Path::new("never_saved")).expect("load failed");
        assert!(loaded.is_none());
        assert_eq!(repo.count(), 0);
    }
}
