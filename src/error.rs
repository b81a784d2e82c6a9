//! Error types for each layer of the scraper.
//!
//! Skipped articles are not errors; they are reported through
//! [`crate::models::Extraction::Skipped`]. Everything in here is fatal for
//! the run and ends up as the process exit error.

use thiserror::Error;

/// Failure to load a page through a [`crate::driver::PageDriver`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for DriverError {
    fn from(err: reqwest::Error) -> Self {
        DriverError::Network(err.to_string())
    }
}

/// A timestamp that could not be turned into `mm/dd/yyyy`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("expected `Month Day, Year`, got {0:?}")]
    Shape(String),

    #[error("unknown month {0:?}")]
    Month(String),

    #[error("invalid day {0:?}")]
    Day(String),

    #[error("year must have four digits, got {0:?}")]
    Year(String),

    #[error("{month}/{day}/{year} is not a calendar date")]
    Calendar { month: u32, day: u32, year: i32 },
}

/// Fatal errors while walking listing pages or extracting an article.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to load {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: DriverError,
    },

    #[error("no headline element found on {url}")]
    MissingHeadline { url: String },

    #[error("no author element found on {url}")]
    MissingAuthor { url: String },

    #[error("invalid URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors raised while writing the CSV files or the SQLite table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("the {0} selector list is empty")]
    EmptySelectors(&'static str),
}
