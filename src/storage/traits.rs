//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{IncidentRecord, StoredIncident};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for incident storage backends
///
/// The store is append-only from the crawler's perspective: records are
/// inserted once and never updated or deleted by a run.
pub trait IncidentStore {
    /// Creates the incident table and its uniqueness constraint if absent
    ///
    /// Idempotent; called at the start of every run.
    fn ensure_schema(&mut self) -> StorageResult<()>;

    /// Inserts a record unless one with the same normalized title exists
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The record was newly inserted
    /// * `Ok(false)` - A record with the same title key already existed
    fn insert_if_absent(&mut self, record: &IncidentRecord) -> StorageResult<bool>;

    /// Looks up a stored incident by title (normalized before comparison)
    fn get_by_title(&self, title: &str) -> StorageResult<Option<StoredIncident>>;

    /// Counts all stored incidents
    fn count_incidents(&self) -> StorageResult<u64>;

    /// Counts stored incidents that carry an occurrence timestamp
    fn count_dated_incidents(&self) -> StorageResult<u64>;

    /// Gets incident counts per category, most frequent first
    fn count_by_category(&self) -> StorageResult<Vec<(String, u64)>>;

    /// Gets the most recent occurrence timestamp in the store
    fn latest_occurrence(&self) -> StorageResult<Option<i64>>;
}
