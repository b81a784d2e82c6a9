//! Scraping of listing and article pages.
//!
//! Scraping happens in two phases:
//!
//! 1. **Indexing**: collect article URLs from a listing page
//! 2. **Extraction**: load each article and read headline, timestamp and author
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | Walks a listing page and groups results by date |
//! | [`article`] | Extracts and normalizes one article page |
//!
//! Articles without a usable timestamp are logged and skipped. Any other
//! failure (missing headline or author, a page that won't load) ends the walk.

pub mod archive;
pub mod article;
