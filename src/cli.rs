//! Command-line interface definitions.
//!
//! Every option is optional. With no arguments the scraper walks the archive
//! page over plain HTTP and writes CSV files and `article.db` into the
//! current directory. Flags override values from the `--config` file.

use crate::config::{DriverKind, ScraperConfig};
use crate::scrapers::archive::ScrapeMode;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Archive page, outputs in the current directory
/// verge_archive
///
/// # Top stories through a Browserless instance, outputs in ./out
/// verge_archive --mode top --driver browserless \
///     --browserless-url http://localhost:3000 -o ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listing page to start from
    #[arg(short = 'M', long, value_enum, default_value_t = ScrapeMode::Archive)]
    pub mode: ScrapeMode,

    /// Output directory for CSV files and the database
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// SQLite database file name
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// How pages are loaded
    #[arg(long, value_enum)]
    pub driver: Option<DriverKind>,

    /// Browserless base URL
    #[arg(long, env = "BROWSERLESS_URL")]
    pub browserless_url: Option<String>,

    /// Browserless API token
    #[arg(long, env = "BROWSERLESS_TOKEN", hide_env_values = true)]
    pub browserless_token: Option<String>,

    /// Don't write CSV files
    #[arg(long)]
    pub skip_csv: bool,

    /// Don't write the SQLite table
    #[arg(long)]
    pub skip_sqlite: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut ScraperConfig) {
        if let Some(ref dir) = self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(ref database) = self.database {
            config.output.database = database.clone();
        }
        if let Some(kind) = self.driver {
            config.driver.kind = kind;
        }
        if let Some(ref url) = self.browserless_url {
            config.driver.browserless_url = url.clone();
        }
        if let Some(ref token) = self.browserless_token {
            config.driver.browserless_token = Some(token.clone());
        }
    }
}
