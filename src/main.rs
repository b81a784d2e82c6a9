//! # Verge Archive
//!
//! Scrapes article metadata (URL, headline, author, publication date) from
//! The Verge's listing pages and stores it as per-date CSV files and a SQLite
//! table.
//!
//! ## Usage
//!
//! ```sh
//! verge_archive
//! verge_archive --mode top --driver browserless -o ./out
//! ```
//!
//! ## Architecture
//!
//! The run is a single sequential pipeline:
//! 1. **Indexing**: read article links from the archive (or home) page
//! 2. **Extraction**: load each article and normalize headline, date and author
//! 3. **Grouping**: bucket records by publication date
//! 4. **Output**: write one CSV per date and insert every record into SQLite

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod driver;
mod error;
mod models;
mod normalize;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::{CompiledSelectors, DriverKind, OutputConfig, ScraperConfig};
use driver::PageDriver;
use driver::browserless::BrowserlessDriver;
use driver::http::HttpDriver;
use error::ScrapeError;
use models::ArticleCollection;
use outputs::ArticleStore;
use scrapers::archive::{ArchiveWalker, ScrapeMode};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("verge_archive starting up");

    let args = Cli::parse();
    debug!(config = ?args.config, mode = ?args.mode, "Parsed CLI arguments");

    let mut config = match args.config {
        Some(ref path) => {
            let config = ScraperConfig::load(path)?;
            info!(path = %path.display(), "Loaded configuration");
            config
        }
        None => ScraperConfig::default(),
    };
    args.apply(&mut config);
    let selectors = CompiledSelectors::compile(&config.site.selectors)?;

    // Fail on a bad output path before any page is loaded.
    ensure_writable_dir(&config.output.dir).await?;

    info!(mode = ?args.mode, driver = ?config.driver.kind, "Starting walk");
    let collection = match config.driver.kind {
        DriverKind::Http => {
            let driver = HttpDriver::new(&config.driver)?;
            walk(driver, &config, selectors, args.mode).await?
        }
        DriverKind::Browserless => {
            let driver = BrowserlessDriver::new(&config.driver)?;
            walk(driver, &config, selectors, args.mode).await?
        }
    };

    write_outputs(&collection, &config.output, args.skip_csv, args.skip_sqlite)?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = collection.len(),
        dates = collection.buckets().len(),
        "Execution complete"
    );

    Ok(())
}

/// Walk the listing page for `mode` with `driver`, closing it afterwards.
async fn walk<D: PageDriver>(
    driver: D,
    config: &ScraperConfig,
    selectors: CompiledSelectors,
    mode: ScrapeMode,
) -> Result<ArticleCollection, ScrapeError> {
    ArchiveWalker::new(driver, &config.site, selectors)
        .run(mode)
        .await
}

/// Write the enabled sinks. Returns the CSV files written and the rows
/// inserted into the relational table.
fn write_outputs(
    collection: &ArticleCollection,
    output: &OutputConfig,
    skip_csv: bool,
    skip_sqlite: bool,
) -> Result<(Vec<PathBuf>, usize), Box<dyn Error>> {
    if collection.is_empty() {
        warn!("No articles scraped; outputs will be empty");
    }

    let store = ArticleStore::new(collection, output);
    let files = if skip_csv {
        info!("Skipping CSV output");
        Vec::new()
    } else {
        let files = store.write_delimited_files()?;
        info!(count = files.len(), "CSV output written");
        files
    };
    let rows = if skip_sqlite {
        info!("Skipping SQLite output");
        0
    } else {
        store.write_relational_table()?
    };
    Ok((files, rows))
}
