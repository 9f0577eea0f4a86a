//! Crawler module for catalog page fetching and walking
//!
//! This module contains the core walking logic, including:
//! - HTTP fetching behind the [`Fetcher`] capability
//! - HTML parsing into catalog entries and the next-page link
//! - Politeness pacing between requests
//! - The pagination loop itself ([`PageWalker`])

mod fetcher;
mod pacer;
mod parser;
mod walker;

pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use pacer::{NoDelay, Pacer, TokioPacer};
pub use parser::{CatalogPage, CatalogParser, HtmlCatalogParser, ParseError};
pub use walker::{PageFailure, PageWalker};

use crate::config::Config;
use crate::output::{CsvSink, RunStats};
use crate::WalkError;
use std::path::Path;

/// Runs a complete walk into the configured CSV file
///
/// This is the main entry point for a walk. It will:
/// 1. Validate the configuration and build the walker
/// 2. Create the CSV file and write its header
/// 3. Walk the catalog, streaming records into the file
/// 4. Flush the file and return the statistics
///
/// # Arguments
///
/// * `config` - The walker configuration
///
/// # Returns
///
/// * `Ok(RunStats)` - The walk ran; check the stats for how far it got
/// * `Err(WalkError)` - The walk could not start, or the CSV file could not
///   be written
pub async fn walk_to_csv(config: &Config) -> Result<RunStats, WalkError> {
    let walker = PageWalker::new(config)?;
    let mut sink = CsvSink::create(Path::new(&config.output.csv_path))?;

    let stats = walker.run(&mut sink).await;
    let written = sink.finish()?;

    tracing::info!("Saved {} books to {}", written, config.output.csv_path);
    Ok(stats)
}
