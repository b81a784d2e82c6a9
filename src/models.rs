//! Data models for scraped articles.
//!
//! - [`ArticleRecord`]: one article with normalized fields
//! - [`Extraction`]: result of visiting a single article page
//! - [`ArticleCollection`]: records grouped by publication date
//! - [`WalkStats`]: counters reported at the end of a walk

use std::collections::HashMap;

/// A single scraped article.
///
/// Built by the extractor once every field has been normalized and never
/// modified afterwards; the collection only hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Absolute URL of the article page.
    pub url: String,
    /// Headline wrapped in literal double quotes.
    pub headline: String,
    /// Author name with each word capitalized.
    pub author: String,
    /// Publication date as `mm/dd/yyyy`.
    pub date: String,
}

impl ArticleRecord {
    pub fn new(url: String, headline: String, author: String, date: String) -> Self {
        Self {
            url,
            headline,
            author,
            date,
        }
    }
}

/// Outcome of visiting one article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Article(ArticleRecord),
    /// The page has no usable timestamp and is left out of every output.
    Skipped { url: String, reason: String },
}

/// Records sharing one normalized date, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBucket {
    pub date: String,
    pub articles: Vec<ArticleRecord>,
}

/// Articles grouped by date.
///
/// Buckets iterate in the order their date was first seen and records keep
/// the order they were pushed.
#[derive(Debug, Default, Clone)]
pub struct ArticleCollection {
    buckets: Vec<DateBucket>,
    index: HashMap<String, usize>,
}

impl ArticleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group an ordered list of records by date.
    pub fn from_records(records: impl IntoIterator<Item = ArticleRecord>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.push(record);
        }
        collection
    }

    /// Append a record to the bucket for its date.
    pub fn push(&mut self, record: ArticleRecord) {
        match self.index.get(&record.date) {
            Some(&i) => self.buckets[i].articles.push(record),
            None => {
                self.index.insert(record.date.clone(), self.buckets.len());
                self.buckets.push(DateBucket {
                    date: record.date.clone(),
                    articles: vec![record],
                });
            }
        }
    }

    pub fn buckets(&self) -> &[DateBucket] {
        &self.buckets
    }

    #[cfg(test)]
    pub fn get(&self, date: &str) -> Option<&[ArticleRecord]> {
        self.index
            .get(date)
            .map(|&i| self.buckets[i].articles.as_slice())
    }

    /// Every record, bucket order first and then record order.
    pub fn iter(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.buckets.iter().flat_map(|b| b.articles.iter())
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.articles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Counters for one pass over a listing page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    pub discovered: usize,
    pub scraped: usize,
    pub skipped: usize,
}
