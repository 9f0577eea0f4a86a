//! Catalog-Walker main entry point
//!
//! This is the command-line interface for the Catalog-Walker catalog scraper.

use anyhow::{bail, Context};
use catalog_walker::config::{load_config_with_hash, validate, Config};
use catalog_walker::crawler::walk_to_csv;
use catalog_walker::output::print_summary;
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Catalog-Walker: a polite paginated catalog scraper
///
/// Catalog-Walker follows the "next page" links of a catalog website, one
/// page at a time, and writes one CSV row per catalog entry. Without a
/// configuration file it scrapes books.toscrape.com into books_data.csv.
#[derive(Parser, Debug)]
#[command(name = "catalog-walker")]
#[command(version = "1.0.0")]
#[command(about = "A polite paginated catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Start URL, overriding the configuration
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// CSV output path, overriding the configuration
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Delay between page requests in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Stop after this many pages
    #[arg(long, value_name = "N", conflicts_with = "first_page_only")]
    max_pages: Option<u32>,

    /// Only scrape the start page
    #[arg(long)]
    first_page_only: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be walked without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Also append log output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given; using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_walk(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr, and are also appended to `log_file` when one is given.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_walker=info,warn"),
            1 => EnvFilter::new("catalog_walker=debug,info"),
            2 => EnvFilter::new("catalog_walker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Opens `path` for appending, creating it if needed
fn open_log_file(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Applies command-line flags on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(start_url) = &cli.start_url {
        config.walker.start_url = start_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.walker.request_delay_ms = delay_ms;
    }
    if cli.first_page_only {
        config.walker.max_pages = Some(1);
    } else if let Some(max_pages) = cli.max_pages {
        config.walker.max_pages = Some(max_pages);
    }
}

/// Handles the --dry-run mode: shows what would be walked
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Walker Dry Run ===\n");

    println!("Walker Configuration:");
    println!("  Start URL: {}", config.walker.start_url);
    println!("  Request delay: {}ms", config.walker.request_delay_ms);
    println!("  Request timeout: {}s", config.walker.request_timeout_secs);
    match config.walker.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unlimited"),
    }
    match config.walker.walk_timeout_secs {
        Some(secs) => println!("  Walk timeout: {}s", secs),
        None => println!("  Walk timeout: none"),
    }
    println!(
        "  Max consecutive failures: {}",
        config.walker.max_consecutive_failures
    );
    println!("  Respect robots.txt: {}", config.walker.respect_robots);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nSelectors:");
    println!("  Entry: {}", config.selectors.entry);
    println!("  Title link: {}", config.selectors.title_link);
    println!("  Price: {}", config.selectors.price);
    println!("  Rating: {}", config.selectors.rating);
    println!("  Availability: {}", config.selectors.availability);
    println!("  Next page: {}", config.selectors.next_page);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main walk operation
async fn handle_walk(config: &Config) -> anyhow::Result<()> {
    let stats = walk_to_csv(config)
        .await
        .context("walk could not complete")?;

    print_summary(&stats);

    if stats.records_accepted == 0 {
        bail!(
            "no books were scraped; {} contains only the header",
            config.output.csv_path
        );
    }

    if stats.is_degraded() {
        tracing::warn!(
            "Walk incomplete ({}): {} pages skipped, {} entries discarded, {} fields absent",
            stats
                .stop_reason
                .map_or("unknown", |reason| reason.as_str()),
            stats.pages_skipped,
            stats.records_discarded,
            stats.fields_absent
        );
    }

    Ok(())
}
