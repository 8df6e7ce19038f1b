//! Page fetching for the incident listing
//!
//! This module contains:
//! - The PageFetcher adapter contract the crawl driver consumes
//! - An HTTP implementation built on reqwest
//! - Headline block extraction from listing page HTML

mod blocks;
mod http;

pub use blocks::extract_headline_blocks;
pub use http::{build_http_client, HttpPageFetcher};

use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a listing page
///
/// A fetch failure is always distinct from a page that loads fine but
/// contains zero headline blocks; the latter is not an error.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Contract for retrieving one listing page's HTML by index
///
/// The crawl driver only ever talks to this trait, so it can run against
/// canned fixtures in tests with no network access. Implementations also
/// expose the base origin, which the extractor needs to resolve relative
/// report links.
// Fetchers are used by value from a single task; no Send bound needed on
// the returned future.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Base origin used to resolve relative report links
    fn base_url(&self) -> &Url;

    /// Retrieves the HTML of one listing page
    ///
    /// # Arguments
    ///
    /// * `index` - 1-based page index
    async fn fetch_page(&self, index: u32) -> Result<String, FetchError>;
}
