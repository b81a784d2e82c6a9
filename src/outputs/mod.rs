//! Persistence of scraped articles.
//!
//! [`ArticleStore`] takes the finished [`ArticleCollection`] and writes it to
//! two sinks:
//!
//! - [`delimited`]: one CSV file per date bucket
//! - [`sqlite`]: every record in a single `Article` table
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── 03042024_verge.csv
//! ├── 03032024_verge.csv
//! └── article.db
//! ```
//!
//! Each sink opens and closes its own files; nothing is shared between the
//! two writes.

pub mod delimited;
pub mod sqlite;

use crate::config::OutputConfig;
use crate::error::StoreError;
use crate::models::ArticleCollection;
use std::path::PathBuf;
use tracing::{info, instrument};

pub struct ArticleStore<'a> {
    collection: &'a ArticleCollection,
    output: &'a OutputConfig,
}

impl<'a> ArticleStore<'a> {
    pub fn new(collection: &'a ArticleCollection, output: &'a OutputConfig) -> Self {
        Self { collection, output }
    }

    /// Write one CSV per date bucket and return the paths written.
    #[instrument(level = "info", skip_all, fields(dir = %self.output.dir.display()))]
    pub fn write_delimited_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut written = Vec::with_capacity(self.collection.buckets().len());
        for bucket in self.collection.buckets() {
            let path = self
                .output
                .dir
                .join(delimited::file_name(&bucket.date, &self.output.file_suffix));
            delimited::write_bucket(&path, &bucket.articles)?;
            info!(path = %path.display(), rows = bucket.articles.len(), "Wrote CSV");
            written.push(path);
        }
        Ok(written)
    }

    /// Insert every record into the `Article` table; returns the row count.
    #[instrument(level = "info", skip_all, fields(database = %self.output.database_path().display()))]
    pub fn write_relational_table(&self) -> Result<usize, StoreError> {
        let path = self.output.database_path();
        let inserted = sqlite::write_articles(&path, self.collection.iter())?;
        info!(path = %path.display(), rows = inserted, "Wrote SQLite table");
        Ok(inserted)
    }
}
