//! HTTP page fetcher implementation
//!
//! This module handles the actual page requests: building a reqwest client
//! with a realistic user agent and sane timeouts, mapping a page index to a
//! listing URL, and classifying transport failures.

use crate::config::SourceConfig;
use crate::fetch::{FetchError, PageFetcher};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Default User-Agent for page requests
///
/// The listing site serves a reduced page to unadorned clients, so the
/// default mimics a desktop browser. Override via `[source] user-agent`.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36";

/// HTTP-backed page fetcher for the incident listing
pub struct HttpPageFetcher {
    client: Client,
    base_url: Url,
}

impl HttpPageFetcher {
    /// Creates a fetcher for the configured source
    ///
    /// # Arguments
    ///
    /// * `config` - The source listing configuration
    ///
    /// # Returns
    ///
    /// * `Ok(HttpPageFetcher)` - Client built and base URL parsed
    /// * `Err(HarvestError)` - Invalid base URL or client build failure
    pub fn new(config: &SourceConfig) -> crate::Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let client = build_http_client(config.user_agent.as_deref())?;

        Ok(Self { client, base_url })
    }

    /// Maps a 1-based page index to a listing URL
    ///
    /// Page 1 is the base URL itself; later pages add a `page` query
    /// parameter on top of whatever query the base already carries.
    pub fn page_url(&self, index: u32) -> Url {
        if index <= 1 {
            return self.base_url.clone();
        }

        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("page", &index.to_string());
        url
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Optional User-Agent override; the browser-style
///   default is used when absent
pub fn build_http_client(user_agent: Option<&str>) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
        .timeout(Duration::from_secs(20))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

impl PageFetcher for HttpPageFetcher {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch_page(&self, index: u32) -> Result<String, FetchError> {
        let url = self.page_url(index);
        let url_str = url.to_string();
        tracing::debug!("Fetching page {} from {}", index, url_str);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(&url_str, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify_error(&url_str, e))
    }
}

/// Classifies a reqwest error into the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
