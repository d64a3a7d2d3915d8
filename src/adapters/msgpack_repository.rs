//! MessagePack implementation of the table repository.
//!
//! Persists each Q-table as a versioned MessagePack envelope via rmp_serde.
//! f32 cell values survive the round-trip bit-exactly.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{
    Result,
    adapters::envelope::SavedTable,
    error::Error,
    ports::TableRepository,
    q_table::QTable,
};

/// File-backed MessagePack table repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl TableRepository for MsgPackRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let saved = SavedTable::from_table(table);
        rmp_serde::encode::write(&mut writer, &saved).map_err(|e| Error::Serialization {
            operation: format!("serialize Q-table to {path:?}"),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Option<QTable>> {
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let reader = BufReader::new(file);

        let saved: SavedTable =
            rmp_serde::decode::from_read(reader).map_err(|e| Error::Serialization {
                operation: format!("deserialize Q-table from {path:?}"),
                message: e.to_string(),
            })?;

        saved.into_table(path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn save_load_round_trip_is_lossless() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("q_move.msgpack");

        let mut table = QTable::zeros(&[2, 3, 2]);
        table.set_value(&[1, 2], &[0], 0.1);
        table.set_value(&[0, 1], &[1], -2.75);
        // A value with no short decimal representation.
        table.set_value(&[1, 0], &[1], std::f32::consts::PI);

        let repo = MsgPackRepository::new();
        repo.save(&table, &path).expect("save failed");
        let loaded = repo.load(&path).expect("load failed").expect("no table");

        assert_eq!(loaded, table);
    }

    #[test]
    fn load_missing_file_is_none() {
        let repo = MsgPackRepository::new();
        let loaded = repo
            .load(Path::new("/tmp/duelcore_nonexistent_12345.msgpack"))
            .expect("missing file should not error");
        assert!(loaded.is_none());
    }

    #[test]
    fn save_to_invalid_path_is_an_error() {
        let repo = MsgPackRepository::new();
        let table = QTable::zeros(&[2, 2]);
        let result = repo.save(&table, Path::new("/invalid_dir_12345/q.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_fresh_table() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("q_move.msgpack");
        std::fs::write(&path, b"not msgpack").expect("write failed");

        let repo = MsgPackRepository::new();
        let result = repo.load(&path);
        assert!(matches!(result, Err(Error::Serialization { .. })));
    }
}
