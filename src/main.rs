//! Avharvest main entry point
//!
//! This is the command-line interface for the avharvest incident scraper.

use anyhow::Context;
use avharvest::config::load_config_with_hash;
use avharvest::crawler::crawl;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Avharvest: an incremental aviation incident harvester
///
/// Avharvest walks the incident listing page by page, parses each headline
/// into category, title, location, cause, date and report URL, and stores
/// new incidents in a local SQLite database. Re-running is safe: incidents
/// already in the database are skipped.
#[derive(Parser, Debug)]
#[command(name = "avharvest")]
#[command(version = "1.0.0")]
#[command(about = "An incremental aviation incident harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("avharvest=info,warn"),
            1 => EnvFilter::new("avharvest=debug,info"),
            2 => EnvFilter::new("avharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &avharvest::config::Config) {
    println!("=== Avharvest Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Max pages: {}", config.scraper.max_pages);
    println!("  Request delay: {}ms", config.scraper.request_delay_ms);
    println!("  Skip news entries: {}", config.scraper.skip_news);
    println!("  Verbose progress: {}", config.scraper.verbose);

    println!("\nSource:");
    println!("  Base URL: {}", config.source.base_url);
    if let Some(user_agent) = &config.source.user_agent {
        println!("  User agent: {}", user_agent);
    }

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would scrape up to {} page(s) from {}",
        config.scraper.max_pages, config.source.base_url
    );
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &avharvest::config::Config) -> anyhow::Result<()> {
    use std::path::Path;
    use avharvest::output::{load_statistics, print_statistics};
    use avharvest::storage::{IncidentStore, SqliteStore};

    println!("Database: {}\n", config.output.database_path);

    // Open the database
    let mut store = SqliteStore::new(Path::new(&config.output.database_path))?;
    store.ensure_schema()?;

    // Load and print statistics
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: avharvest::config::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: up to {} page(s) from {}",
        config.scraper.max_pages,
        config.source.base_url
    );

    let report = crawl(config).await?;

    println!("\n=== Crawl Finished ===");
    println!("Outcome:          {}", report.outcome);
    println!("Pages processed:  {}", report.pages_processed);
    println!("New incidents:    {}", report.inserted);
    println!("Duplicates:       {}", report.duplicates);
    println!("Rejected blocks:  {}", report.rejected);
    println!("Filtered (news):  {}", report.filtered);

    Ok(())
}
