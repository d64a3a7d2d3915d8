//! Versioned on-disk envelope for persisted Q-tables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    q_table::QTable,
};

/// Serialized representation of one Q-table.
///
/// Shape travels with the values so a loader can detect schema drift before
/// touching the table; `version` guards against format drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SavedTable {
    pub version: u32,
    pub shape: Vec<usize>,
    pub values: Vec<f32>,
}

impl SavedTable {
    pub const VERSION: u32 = 1;

    pub fn from_table(table: &QTable) -> Self {
        Self {
            version: Self::VERSION,
            shape: table.shape().to_vec(),
            values: table.raw_values(),
        }
    }

    /// Validate the envelope and rebuild the table. `path` is only used for
    /// error reporting.
    pub fn into_table(self, path: &Path) -> Result<QTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                path: path.to_path_buf(),
                found: self.version,
                expected: Self::VERSION,
            });
        }
        let expected_len: usize = self.shape.iter().product();
        QTable::from_raw(&self.shape, self.values).ok_or_else(|| Error::Serialization {
            operation: format!("rebuild Q-table from {path:?}"),
            message: format!(
                "shape {:?} implies {expected_len} cells but the stored value count differs",
                self.shape
            ),
        })
    }
}
