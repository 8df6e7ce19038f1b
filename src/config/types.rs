use serde::Deserialize;

/// Main configuration structure for avharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Scraper behavior configuration
///
/// This is the value object handed to the crawl driver; everything the
/// driver's loop depends on lives here.
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Maximum number of listing pages to scrape in one run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Delay between successive page fetches (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Whether to withhold entries categorized as news from the store
    #[serde(rename = "skip-news", default = "default_skip_news")]
    pub skip_news: bool,

    /// Whether to emit per-page progress at info level
    #[serde(default)]
    pub verbose: bool,
}

/// Source listing page configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the incident listing page
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Optional User-Agent override for page requests
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

fn default_skip_news() -> bool {
    true
}
