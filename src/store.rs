//! Per-agent Q-table file management.
//!
//! Binds a [`TableRepository`] to the host-supplied base directory and the
//! agent's variant, deriving one file per table and enforcing the shape
//! contract on load.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    ports::TableRepository,
    q_table::QTable,
    schema::Variant,
};

/// Which of the agent's two tables an operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Move,
    Shoot,
}

impl TableKind {
    fn stem(self) -> &'static str {
        match self {
            TableKind::Move => "q_move",
            TableKind::Shoot => "q_shoot",
        }
    }
}

/// Loads, initializes, and persists the two Q-tables of one agent.
pub struct QTableStore {
    base_dir: PathBuf,
    variant: Variant,
    repository: Arc<dyn TableRepository + Send + Sync>,
}

impl QTableStore {
    /// Create a store rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `base_dir` is not an existing
    /// directory; a missing or wrong base directory must surface before any
    /// learning happens, not on the first save.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        variant: Variant,
        repository: Arc<dyn TableRepository + Send + Sync>,
    ) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.is_dir() {
            return Err(Error::Config {
                message: format!("base directory {base_dir:?} does not exist"),
            });
        }
        Ok(Self {
            base_dir,
            variant,
            repository,
        })
    }

    /// File path for one table, e.g. `<base>/q_move_advanced.msgpack`.
    pub fn table_path(&self, kind: TableKind) -> PathBuf {
        self.base_dir
            .join(format!("{}_{}.msgpack", kind.stem(), self.variant.name()))
    }

    fn expected_shape(&self, kind: TableKind) -> Vec<usize> {
        match kind {
            TableKind::Move => self.variant.move_table_shape(),
            TableKind::Shoot => self.variant.shoot_table_shape(),
        }
    }

    /// Return the persisted table, or a zero-filled one when none exists.
    ///
    /// A file that exists but decodes to a different shape is an error: the
    /// schema under which it was written no longer matches, and silently
    /// starting fresh would discard learned state without signal.
    pub fn load_or_init(&self, kind: TableKind) -> Result<QTable> {
        let path = self.table_path(kind);
        let expected = self.expected_shape(kind);
        match self.repository.load(&path)? {
            Some(table) => {
                if table.shape() != expected.as_slice() {
                    return Err(Error::ShapeMismatch {
                        path,
                        expected,
                        found: table.shape().to_vec(),
                    });
                }
                Ok(table)
            }
            None => Ok(QTable::zeros(&expected)),
        }
    }

    /// Persist the whole table. Called after every learning update; the
    /// update is not complete until this succeeds.
    pub fn persist(&self, kind: TableKind, table: &QTable) -> Result<()> {
        self.repository.save(table, &self.table_path(kind))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
