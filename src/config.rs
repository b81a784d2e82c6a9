//! Runtime configuration.
//!
//! Every field has a default matching The Verge's current markup, so the
//! scraper runs without a config file. A YAML file passed with `--config`
//! overrides any subset of the fields:
//!
//! ```yaml
//! site:
//!   archive_url: https://www.theverge.com/archives/2
//! output:
//!   dir: ./out
//! driver:
//!   kind: browserless
//!   browserless_url: http://localhost:3000
//! ```

use crate::error::ConfigError;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub site: SiteConfig,
    pub output: OutputConfig,
    pub driver: DriverConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listing page for top-articles mode.
    pub home_url: String,
    /// Listing page for archive mode.
    pub archive_url: String,
    pub selectors: SelectorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_url: "https://www.theverge.com/".to_string(),
            archive_url: "https://www.theverge.com/archives/1".to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// CSS selectors for listing and article pages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub top_links: String,
    pub archive_links: String,
    /// Tried in order; the first one that matches wins.
    pub headline: Vec<String>,
    pub timestamp: String,
    pub author: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            top_links: "ol.relative > li > div > .flex > div > h2 > a".to_string(),
            archive_links: ".duet--content-cards--content-card.z-10 .font-bold > a".to_string(),
            headline: vec![
                ".duet--article--feature-headline".to_string(),
                "h1.mb-28".to_string(),
            ],
            timestamp: ".duet--article--timestamp".to_string(),
            author: "span.font-medium:nth-child(2) > a:nth-child(1)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for the CSV files and the SQLite database.
    pub dir: PathBuf,
    /// CSV files are named `<mmddyyyy>_<file_suffix>.csv`.
    pub file_suffix: String,
    /// SQLite file name, relative to `dir` unless absolute.
    pub database: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_suffix: "verge".to_string(),
            database: PathBuf::from("article.db"),
        }
    }
}

impl OutputConfig {
    pub fn database_path(&self) -> PathBuf {
        self.dir.join(&self.database)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Plain HTTP GET; enough for server-rendered pages.
    #[default]
    Http,
    /// Fully rendered HTML from a Browserless `/content` endpoint.
    Browserless,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DriverConfig {
    pub kind: DriverKind,
    pub browserless_url: String,
    pub browserless_token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            kind: DriverKind::Http,
            browserless_url: "http://localhost:3000".to_string(),
            browserless_token: None,
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ScraperConfig {
    /// Load a YAML config file; missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

/// [`SelectorConfig`] parsed into `scraper` selectors.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub top_links: Selector,
    pub archive_links: Selector,
    pub headline: Vec<Selector>,
    pub timestamp: Selector,
    pub author: Selector,
}

impl CompiledSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        if config.headline.is_empty() {
            return Err(ConfigError::EmptySelectors("headline"));
        }
        Ok(Self {
            top_links: parse_selector(&config.top_links)?,
            archive_links: parse_selector(&config.archive_links)?,
            headline: config
                .headline
                .iter()
                .map(|s| parse_selector(s))
                .collect::<Result<_, _>>()?,
            timestamp: parse_selector(&config.timestamp)?,
            author: parse_selector(&config.author)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
