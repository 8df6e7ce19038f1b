//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the IncidentStore trait.

use crate::extract::IncidentCategory;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{IncidentStore, StorageResult};
use crate::storage::{normalize_title, IncidentRecord, StoredIncident};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new SqliteStore instance
    ///
    /// The parent directory of the database file is created if it does not
    /// exist yet. The schema itself is not touched here; call
    /// [`IncidentStore::ensure_schema`] before inserting.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }
}

impl IncidentStore for SqliteStore {
    fn ensure_schema(&mut self) -> StorageResult<()> {
        initialize_schema(&self.conn)?;
        Ok(())
    }

    fn insert_if_absent(&mut self, record: &IncidentRecord) -> StorageResult<bool> {
        let now = Utc::now().to_rfc3339();
        let title_key = normalize_title(&record.title);

        // INSERT OR IGNORE leaves the row count at zero when the UNIQUE
        // constraint on title_key fires, which is exactly the "already
        // present" signal.
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO incidents
             (category, title, title_key, location, cause, occurred_at, url, scraped_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.category.to_db_string(),
                record.title,
                title_key,
                record.location,
                record.cause,
                record.occurred_at,
                record.url,
                now,
            ],
        )?;

        Ok(changed == 1)
    }

    fn get_by_title(&self, title: &str) -> StorageResult<Option<StoredIncident>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, title, location, cause, occurred_at, url, scraped_at
             FROM incidents WHERE title_key = ?1",
        )?;

        let incident = stmt
            .query_row(params![normalize_title(title)], |row| {
                Ok(StoredIncident {
                    id: row.get(0)?,
                    record: IncidentRecord {
                        category: IncidentCategory::from_db_string(&row.get::<_, String>(1)?)
                            .unwrap_or(IncidentCategory::Unknown),
                        title: row.get(2)?,
                        location: row.get(3)?,
                        cause: row.get(4)?,
                        occurred_at: row.get(5)?,
                        url: row.get(6)?,
                    },
                    scraped_at: row.get(7)?,
                })
            })
            .optional()?;

        Ok(incident)
    }

    fn count_incidents(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM incidents", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_dated_incidents(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(occurred_at) FROM incidents", [], |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }

    fn count_by_category(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, COUNT(*) as count FROM incidents
             GROUP BY category ORDER BY count DESC, category ASC",
        )?;

        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(counts)
    }

    fn latest_occurrence(&self) -> StorageResult<Option<i64>> {
        let latest: Option<i64> =
            self.conn
                .query_row("SELECT MAX(occurred_at) FROM incidents", [], |row| {
                    row.get(0)
                })?;
        Ok(latest)
    }
}
