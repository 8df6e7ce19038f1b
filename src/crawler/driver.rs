//! Crawl driver - the page-by-page harvest loop
//!
//! This module contains the sequential crawl loop that:
//! - Fetches listing pages in index order up to the configured bound
//! - Extracts and persists every valid incident on each page
//! - Applies the pacing delay between page fetches
//! - Stops early when a page fails to fetch or yields no headlines

use crate::config::ScraperConfig;
use crate::extract::extract_record;
use crate::fetch::{extract_headline_blocks, PageFetcher};
use crate::storage::IncidentStore;
use crate::HarvestError;
use std::fmt;
use std::time::Duration;

/// How a crawl run ended
///
/// Every variant is a regular, reportable result; storage failures are the
/// only thing surfaced as an error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// All configured pages were fetched and processed
    Completed,

    /// A page yielded zero headline blocks; later pages were not attempted
    Exhausted { page: u32 },

    /// A page fetch failed; later pages were not attempted, no retry
    FetchFailed { page: u32, error: String },
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Exhausted { page } => {
                write!(f, "stopped early at page {}: no headlines found", page)
            }
            Self::FetchFailed { page, error } => {
                write!(f, "stopped early at page {}: {}", page, error)
            }
        }
    }
}

/// Tallies and outcome of one crawl run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Pages that were fetched and contained at least one headline block
    pub pages_processed: u32,

    /// Records newly inserted into the store
    pub inserted: u64,

    /// Valid records whose title was already stored
    pub duplicates: u64,

    /// Blocks the extractor refused (no link, empty title, ...)
    pub rejected: u64,

    /// Valid records withheld by the category filter
    pub filtered: u64,

    /// How the run ended
    pub outcome: RunOutcome,
}

impl RunReport {
    fn new() -> Self {
        Self {
            pages_processed: 0,
            inserted: 0,
            duplicates: 0,
            rejected: 0,
            filtered: 0,
            outcome: RunOutcome::Completed,
        }
    }
}

/// The sequential crawl driver
///
/// Generic over the page fetcher and the store so the whole loop is
/// testable against canned pages and an in-memory database. One driver
/// performs one run; runs are idempotent because the store dedups by
/// normalized title.
pub struct CrawlDriver<F, S> {
    config: ScraperConfig,
    fetcher: F,
    store: S,
}

impl<F: PageFetcher, S: IncidentStore> CrawlDriver<F, S> {
    /// Creates a new driver from its collaborators
    pub fn new(config: ScraperConfig, fetcher: F, store: S) -> Self {
        Self {
            config,
            fetcher,
            store,
        }
    }

    /// Runs the harvest loop over pages 1 through max_pages
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - The run finished; the outcome field says how.
    ///   Fetch failures and exhausted listings end the run early but are
    ///   still reported this way, with everything committed so far intact.
    /// * `Err(HarvestError)` - The store could not be prepared or written
    pub async fn run(&mut self) -> Result<RunReport, HarvestError> {
        self.store.ensure_schema()?;

        let mut report = RunReport::new();

        for page in 1..=self.config.max_pages {
            // Pacing applies between pages only, never before the first fetch
            if page > 1 && self.config.request_delay_ms > 0 {
                tracing::debug!("Pausing {}ms before page {}", self.config.request_delay_ms, page);
                tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
            }

            let html = match self.fetcher.fetch_page(page).await {
                Ok(html) => html,
                Err(error) => {
                    tracing::warn!("Page {} fetch failed, stopping run: {}", page, error);
                    report.outcome = RunOutcome::FetchFailed {
                        page,
                        error: error.to_string(),
                    };
                    return Ok(report);
                }
            };

            let blocks = extract_headline_blocks(&html);
            if blocks.is_empty() {
                // The page numbering scheme is not guaranteed stable;
                // an empty page means the listing ran out, not "skip ahead".
                tracing::info!("Page {} has no headline blocks, stopping run", page);
                report.outcome = RunOutcome::Exhausted { page };
                return Ok(report);
            }

            let mut page_inserted = 0u64;
            let mut page_duplicates = 0u64;

            for block in &blocks {
                match extract_record(block, self.fetcher.base_url()) {
                    Some(record) => {
                        if self.config.skip_news && record.category.is_news() {
                            report.filtered += 1;
                            continue;
                        }

                        if self.store.insert_if_absent(&record)? {
                            report.inserted += 1;
                            page_inserted += 1;
                        } else {
                            report.duplicates += 1;
                            page_duplicates += 1;
                        }
                    }
                    None => report.rejected += 1,
                }
            }

            report.pages_processed += 1;

            if self.config.verbose {
                tracing::info!(
                    "Page {}: {} new, {} already stored",
                    page,
                    page_inserted,
                    page_duplicates
                );
            } else {
                tracing::debug!(
                    "Page {}: {} new, {} already stored",
                    page,
                    page_inserted,
                    page_duplicates
                );
            }
        }

        Ok(report)
    }

    /// Consumes the driver, returning its store
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::storage::{IncidentStore, SqliteStore};
    use std::cell::RefCell;
    use url::Url;

    const EMPTY_PAGE: &str = "<html><body>No entries</body></html>";

    enum PageScript {
        Html(String),
        Error,
    }

    /// Fetcher fed from canned pages, recording every requested index
    struct ScriptedFetcher {
        base: Url,
        pages: Vec<PageScript>,
        requested: RefCell<Vec<u32>>,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<PageScript>) -> Self {
            Self {
                base: Url::parse("https://avherald.example.com/").unwrap(),
                pages,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for ScriptedFetcher {
        fn base_url(&self) -> &Url {
            &self.base
        }

        async fn fetch_page(&self, index: u32) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(index);
            match self.pages.get((index - 1) as usize) {
                Some(PageScript::Html(html)) => Ok(html.clone()),
                Some(PageScript::Error) => Err(FetchError::Status {
                    url: format!("https://avherald.example.com/?page={}", index),
                    status: 500,
                }),
                None => Ok(EMPTY_PAGE.to_string()),
            }
        }
    }

    /// Builds listing page HTML from (headline, href) pairs
    fn listing_page(entries: &[(&str, Option<&str>)]) -> PageScript {
        let mut rows = String::new();
        for (text, href) in entries {
            match href {
                Some(href) => rows.push_str(&format!(
                    r#"<tr><td><a href="{}"><span class="headline_avherald">{}</span></a></td></tr>"#,
                    href, text
                )),
                None => rows.push_str(&format!(
                    r#"<tr><td><span class="headline_avherald">{}</span></td></tr>"#,
                    text
                )),
            }
        }
        PageScript::Html(format!(
            "<html><body><table>{}</table></body></html>",
            rows
        ))
    }

    fn test_config(max_pages: u32) -> ScraperConfig {
        ScraperConfig {
            max_pages,
            request_delay_ms: 0,
            skip_news: true,
            verbose: false,
        }
    }

    fn driver(
        max_pages: u32,
        pages: Vec<PageScript>,
    ) -> CrawlDriver<ScriptedFetcher, SqliteStore> {
        CrawlDriver::new(
            test_config(max_pages),
            ScriptedFetcher::new(pages),
            SqliteStore::new_in_memory().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_run_processes_all_pages() {
        let mut driver = driver(
            2,
            vec![
                listing_page(&[
                    ("Boeing 737 at Berlin on Mar 31st 2025, engine failure", Some("/h?id=1")),
                    ("Cessna 172 at Paris on Jan 1st 2020", Some("/h?id=2")),
                ]),
                listing_page(&[("Piper PA-28 at London, gear up landing", Some("/h?id=3"))]),
            ],
        );

        let report = driver.run().await.unwrap();

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.pages_processed, 2);
        assert_eq!(report.inserted, 3);
        assert_eq!(report.duplicates, 0);
        assert_eq!(report.rejected, 0);

        let store = driver.into_store();
        assert_eq!(store.count_incidents().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_stops_on_empty_page() {
        let mut driver = driver(
            5,
            vec![
                listing_page(&[("Boeing 737 at Berlin", Some("/h?id=1"))]),
                PageScript::Html(EMPTY_PAGE.to_string()),
                listing_page(&[("Never reached", Some("/h?id=9"))]),
            ],
        );

        let report = driver.run().await.unwrap();

        assert_eq!(report.outcome, RunOutcome::Exhausted { page: 2 });
        assert_eq!(report.pages_processed, 1);
        assert_eq!(report.inserted, 1);

        // Page 3 must never be requested once page 2 came up empty
        assert_eq!(*driver.fetcher.requested.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_stops_on_fetch_failure() {
        let mut driver = driver(
            5,
            vec![
                listing_page(&[("Boeing 737 at Berlin", Some("/h?id=1"))]),
                PageScript::Error,
            ],
        );

        let report = driver.run().await.unwrap();

        assert!(matches!(
            report.outcome,
            RunOutcome::FetchFailed { page: 2, .. }
        ));
        // Records committed before the failure survive it
        assert_eq!(report.inserted, 1);
        assert_eq!(*driver.fetcher.requested.borrow(), vec![1, 2]);

        let store = driver.into_store();
        assert_eq!(store.count_incidents().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_second_run_only_finds_duplicates() {
        let pages = || {
            vec![listing_page(&[
                ("Boeing 737 at Berlin on Mar 31st 2025, engine failure", Some("/h?id=1")),
                ("Cessna 172 at Paris on Jan 1st 2020", Some("/h?id=2")),
            ])]
        };

        let mut first = driver(1, pages());
        let first_report = first.run().await.unwrap();
        assert_eq!(first_report.inserted, 2);

        // Same listing, same store: nothing new on the second pass
        let mut second = CrawlDriver::new(
            test_config(1),
            ScriptedFetcher::new(pages()),
            first.into_store(),
        );
        let second_report = second.run().await.unwrap();

        assert_eq!(second_report.inserted, 0);
        assert_eq!(second_report.duplicates, first_report.inserted);
        assert_eq!(second.into_store().count_incidents().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_rejected_blocks_do_not_block_siblings() {
        let mut driver = driver(
            1,
            vec![listing_page(&[
                ("No link here at all", None),
                ("Boeing 737 at Berlin", Some("/h?id=1")),
            ])],
        );

        let report = driver.run().await.unwrap();

        assert_eq!(report.rejected, 1);
        assert_eq!(report.inserted, 1);

        let store = driver.into_store();
        assert_eq!(store.count_incidents().unwrap(), 1);
        assert!(store.get_by_title("No link here at all").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_news_entries_filtered() {
        let mut driver = driver(
            1,
            vec![listing_page(&[
                ("[news] Carrier orders fifty jets", Some("/h?id=1")),
                ("[crash] Boeing 737 at Berlin", Some("/h?id=2")),
            ])],
        );

        let report = driver.run().await.unwrap();

        assert_eq!(report.filtered, 1);
        assert_eq!(report.inserted, 1);

        let store = driver.into_store();
        assert!(store
            .get_by_title("Carrier orders fifty jets")
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_news_kept_when_filter_disabled() {
        let mut config = test_config(1);
        config.skip_news = false;

        let mut driver = CrawlDriver::new(
            config,
            ScriptedFetcher::new(vec![listing_page(&[(
                "[news] Carrier orders fifty jets",
                Some("/h?id=1"),
            )])]),
            SqliteStore::new_in_memory().unwrap(),
        );

        let report = driver.run().await.unwrap();
        assert_eq!(report.filtered, 0);
        assert_eq!(report.inserted, 1);
    }

    #[tokio::test]
    async fn test_duplicate_within_single_run() {
        let mut driver = driver(
            2,
            vec![
                listing_page(&[("Boeing 737 at Berlin", Some("/h?id=1"))]),
                listing_page(&[("Boeing 737 at Berlin", Some("/h?id=1"))]),
            ],
        );

        let report = driver.run().await.unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(driver.into_store().count_incidents().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_first_page_reports_zero() {
        let mut driver = driver(3, vec![PageScript::Html(EMPTY_PAGE.to_string())]);

        let report = driver.run().await.unwrap();

        assert_eq!(report.outcome, RunOutcome::Exhausted { page: 1 });
        assert_eq!(report.pages_processed, 0);
        assert_eq!(report.inserted, 0);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(format!("{}", RunOutcome::Completed), "completed");
        assert_eq!(
            format!("{}", RunOutcome::Exhausted { page: 2 }),
            "stopped early at page 2: no headlines found"
        );
        let failed = RunOutcome::FetchFailed {
            page: 3,
            error: "Unexpected status 500".to_string(),
        };
        assert_eq!(
            format!("{}", failed),
            "stopped early at page 3: Unexpected status 500"
        );
    }
}
