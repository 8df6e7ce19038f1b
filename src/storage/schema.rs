//! Database schema definitions
//!
//! This module contains the SQL schema for the incident database.

/// SQL schema for the database
///
/// The UNIQUE index on `title_key` is the load-bearing dedup constraint:
/// it must live at the storage layer so check-and-insert stays atomic per
/// key even under a future concurrent writer.
pub const SCHEMA_SQL: &str = r#"
-- Harvested incident records, keyed by normalized title
CREATE TABLE IF NOT EXISTS incidents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    title TEXT NOT NULL,
    title_key TEXT NOT NULL UNIQUE,
    location TEXT,
    cause TEXT,
    occurred_at INTEGER,
    url TEXT NOT NULL,
    scraped_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_incidents_category ON incidents(category);
CREATE INDEX IF NOT EXISTS idx_incidents_occurred_at ON incidents(occurred_at);
"#;

/// Initializes the database schema
///
/// Idempotent; safe to call on every run.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Initialize twice
        initialize_schema(&conn).unwrap();
        let result = initialize_schema(&conn);

        // Should succeed the second time too
        assert!(result.is_ok());
    }

    #[test]
    fn test_incidents_table_exists_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='incidents'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_title_key_unique_constraint_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO incidents (category, title, title_key, url, scraped_at)
             VALUES ('crash', 'T', 'key', 'https://example.com/', 'now')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO incidents (category, title, title_key, url, scraped_at)
             VALUES ('crash', 'T2', 'key', 'https://example.com/', 'now')",
            [],
        );
        assert!(result.is_err());
    }
}
