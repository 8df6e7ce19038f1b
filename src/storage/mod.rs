//! Storage module for persisting incident data
//!
//! This module handles all database operations for the harvester, including:
//! - SQLite database initialization and schema management
//! - Insert-if-absent semantics keyed on the normalized title
//! - Lookups and statistics queries

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteStore;
pub use traits::{IncidentStore, StorageError, StorageResult};

use crate::extract::IncidentCategory;

/// A structured incident extracted from one headline block
///
/// This is the unit of persisted knowledge. Identity is the normalized
/// title; everything else is payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRecord {
    /// Category derived from the headline's leading marker
    pub category: IncidentCategory,

    /// Cleaned headline text; the natural key after normalization
    pub title: String,

    /// Best-effort place name, if the headline carried one
    pub location: Option<String>,

    /// Suspected cause or occurrence type, if the headline carried one
    pub cause: Option<String>,

    /// UTC midnight of the reported date, seconds since epoch
    pub occurred_at: Option<i64>,

    /// Absolute link to the full report
    pub url: String,
}

/// An incident row as stored in the database
#[derive(Debug, Clone)]
pub struct StoredIncident {
    pub id: i64,
    pub record: IncidentRecord,
    pub scraped_at: String,
}

/// Normalizes a title into its uniqueness key
///
/// Trims, collapses internal whitespace and lowercases. Two titles with
/// the same key are considered the same incident; the store enforces this
/// with a UNIQUE constraint on the key column.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_lowercases() {
        assert_eq!(normalize_title("Boeing 737 At Berlin"), "boeing 737 at berlin");
    }

    #[test]
    fn test_normalize_title_collapses_whitespace() {
        assert_eq!(
            normalize_title("  Boeing   737\tat\nBerlin "),
            "boeing 737 at berlin"
        );
    }

    #[test]
    fn test_normalize_title_equal_for_variants() {
        assert_eq!(
            normalize_title("Boeing 737 at Berlin"),
            normalize_title("BOEING  737  AT  BERLIN")
        );
    }

    #[test]
    fn test_normalize_title_preserves_punctuation() {
        // Punctuation variants intentionally stay distinct
        assert_ne!(
            normalize_title("Boeing 737, Berlin"),
            normalize_title("Boeing 737 Berlin")
        );
    }
}
