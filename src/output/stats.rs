//! Statistics generation from the incident database
//!
//! This module provides functionality for extracting and displaying
//! store statistics, backing the CLI's `--stats` mode.

use crate::storage::IncidentStore;
use crate::HarvestError;
use chrono::DateTime;

/// Store statistics summary
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    /// Total number of stored incidents
    pub total_incidents: u64,

    /// Incidents that carry an occurrence timestamp
    pub dated_incidents: u64,

    /// Count of incidents per category, most frequent first
    pub by_category: Vec<(String, u64)>,

    /// Most recent occurrence timestamp in the store
    pub latest_occurrence: Option<i64>,
}

/// Loads statistics from a store
///
/// # Arguments
///
/// * `store` - The storage backend to query
///
/// # Returns
///
/// * `Ok(StoreStatistics)` - Successfully loaded statistics
/// * `Err(HarvestError)` - Failed to query statistics
pub fn load_statistics(store: &dyn IncidentStore) -> Result<StoreStatistics, HarvestError> {
    let total_incidents = store.count_incidents()?;
    let dated_incidents = store.count_dated_incidents()?;
    let by_category = store.count_by_category()?;
    let latest_occurrence = store.latest_occurrence()?;

    Ok(StoreStatistics {
        total_incidents,
        dated_incidents,
        by_category,
        latest_occurrence,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Store Statistics ===\n");

    println!("Total incidents: {}", stats.total_incidents);
    println!("With date:       {}", stats.dated_incidents);

    if !stats.by_category.is_empty() {
        println!("\nBy category:");
        for (category, count) in &stats.by_category {
            println!("  {:<10} {}", category, count);
        }
    }

    if let Some(timestamp) = stats.latest_occurrence {
        if let Some(moment) = DateTime::from_timestamp(timestamp, 0) {
            println!("\nMost recent occurrence: {}", moment.format("%Y-%m-%d"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::IncidentCategory;
    use crate::storage::{IncidentRecord, SqliteStore};

    fn record(title: &str, category: IncidentCategory, occurred_at: Option<i64>) -> IncidentRecord {
        IncidentRecord {
            category,
            title: title.to_string(),
            location: None,
            cause: None,
            occurred_at,
            url: "https://avherald.example.com/h?id=1".to_string(),
        }
    }

    #[test]
    fn test_load_statistics_empty_store() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.ensure_schema().unwrap();

        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.total_incidents, 0);
        assert_eq!(stats.dated_incidents, 0);
        assert!(stats.by_category.is_empty());
        assert_eq!(stats.latest_occurrence, None);
    }

    #[test]
    fn test_load_statistics_counts() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.ensure_schema().unwrap();

        store
            .insert_if_absent(&record("One", IncidentCategory::Crash, Some(1577836800)))
            .unwrap();
        store
            .insert_if_absent(&record("Two", IncidentCategory::Crash, Some(1743379200)))
            .unwrap();
        store
            .insert_if_absent(&record("Three", IncidentCategory::Incident, None))
            .unwrap();

        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.total_incidents, 3);
        assert_eq!(stats.dated_incidents, 2);
        assert_eq!(stats.by_category[0], ("crash".to_string(), 2));
        assert_eq!(stats.latest_occurrence, Some(1743379200));
    }
}
