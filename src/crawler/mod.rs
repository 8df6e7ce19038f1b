//! Crawler module for the page-by-page harvest
//!
//! This module contains the crawl driver and the wiring that connects it
//! to the HTTP fetcher and the SQLite store.

mod driver;

pub use driver::{CrawlDriver, RunOutcome, RunReport};

use crate::config::Config;
use crate::fetch::HttpPageFetcher;
use crate::storage::SqliteStore;
use crate::HarvestError;
use std::path::Path;

/// Runs a complete harvest operation
///
/// This is the main entry point for starting a run. It will:
/// 1. Build the HTTP fetcher for the configured source
/// 2. Open (or create) the SQLite store
/// 3. Walk the listing pages and persist every new incident
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(RunReport)` - The run finished; see the report's outcome
/// * `Err(HarvestError)` - Setup or persistence failed
///
/// # Example
///
/// ```no_run
/// use avharvest::config::load_config;
/// use avharvest::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let report = crawl(config).await?;
/// println!("{} new incidents", report.inserted);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> Result<RunReport, HarvestError> {
    let fetcher = HttpPageFetcher::new(&config.source)?;
    let store = SqliteStore::new(Path::new(&config.output.database_path))?;

    let mut driver = CrawlDriver::new(config.scraper.clone(), fetcher, store);
    driver.run().await
}
