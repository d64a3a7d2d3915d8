//! Repository port for Q-table persistence.

use std::path::Path;

use crate::{Result, q_table::QTable};

/// Port for persisting and loading Q-tables.
///
/// Abstracts the storage mechanism so the engine never couples to a concrete
/// serialization format. Saves always write the whole table; the tables are
/// small enough that full rewrites beat the complexity of partial updates.
pub trait TableRepository {
    /// Persist `table` at `path`, overwriting any prior contents. Shape and
    /// cell values must survive a round-trip losslessly.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be created or written, or if
    /// serialization fails.
    fn save(&self, table: &QTable, path: &Path) -> Result<()>;

    /// Load the table persisted at `path`.
    ///
    /// Returns `Ok(None)` when nothing has been persisted there yet; callers
    /// decide whether that means "start fresh". A file that exists but cannot
    /// be decoded is an error, never `None` — corrupt learned state must not
    /// be silently replaced.
    fn load(&self, path: &Path) -> Result<Option<QTable>>;
}
