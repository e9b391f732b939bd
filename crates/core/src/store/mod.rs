//! Record storage - the keyed store behind the analysis endpoints.
//!
//! The store is content-addressed: record ids are the SHA-256 hash of the
//! stored value, so equal values collapse to one record and insertion is
//! idempotent by construction.

mod sqlite;

pub use sqlite::SqliteStringStore;

use thiserror::Error;

use crate::analysis::StringRecord;

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    /// A persisted row failed to decode back into a record.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Trait for string record storage.
///
/// Implementations must be concurrency safe: concurrent inserts with the
/// same id leave exactly one record, and enumeration never observes a
/// partially written record.
pub trait StringStore: Send + Sync {
    /// Insert a record unless its id is already present.
    ///
    /// Returns true if inserted, false on an id collision. The existing
    /// record is never overwritten; the store is append-once per id.
    fn insert_if_absent(&self, record: &StringRecord) -> Result<bool, StoreError>;

    /// Check whether a record with this id exists.
    fn exists(&self, id: &str) -> Result<bool, StoreError>;

    /// Fetch a record by id.
    fn get(&self, id: &str) -> Result<Option<StringRecord>, StoreError>;

    /// All records, ordered by creation time ascending with insertion
    /// order as the deterministic tiebreak.
    fn get_all(&self) -> Result<Vec<StringRecord>, StoreError>;

    /// Remove a record by id; no-op when absent.
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}
