//! Per-date CSV output.
//!
//! Each date bucket becomes `<mmddyyyy>_<suffix>.csv` with the header
//! `ID,URL,Headline,Author,Date`. `ID` restarts at 0 in every file. Fields
//! are quoted when they contain commas, quotes or line breaks; headlines
//! always do, since they carry literal quotes.

use crate::error::StoreError;
use crate::models::ArticleRecord;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "ID")]
    id: usize,
    #[serde(rename = "URL")]
    url: &'a str,
    #[serde(rename = "Headline")]
    headline: &'a str,
    #[serde(rename = "Author")]
    author: &'a str,
    #[serde(rename = "Date")]
    date: &'a str,
}

/// `03/04/2024` with suffix `verge` -> `03042024_verge.csv`.
pub fn file_name(date: &str, suffix: &str) -> String {
    format!("{}_{}.csv", date.replace('/', ""), suffix)
}

/// Write one bucket, replacing any existing file at `path`.
pub fn write_bucket(path: &Path, articles: &[ArticleRecord]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    for (id, article) in articles.iter().enumerate() {
        writer.serialize(CsvRow {
            id,
            url: &article.url,
            headline: &article.headline,
            author: &article.author,
            date: &article.date,
        })?;
    }
    writer.flush()?;
    Ok(())
}
