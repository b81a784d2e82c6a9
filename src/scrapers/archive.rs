//! Listing page walker.
//!
//! Reads article links from a listing page (the home page's top stories or
//! the archive index) and extracts each article in turn. Navigation is
//! strictly sequential: the next page is requested only after the previous
//! one has been processed, and the first fatal error stops the walk.

use super::article::scrape_article;
use crate::config::{CompiledSelectors, SiteConfig};
use crate::driver::{Page, PageDriver};
use crate::error::ScrapeError;
use crate::models::{ArticleCollection, ArticleRecord, Extraction, WalkStats};
use futures::stream::{self, StreamExt, TryStreamExt};
use scraper::Selector;
use tracing::{debug, error, info, instrument, warn};

/// Which listing page a run starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ScrapeMode {
    /// The archive index; results grouped by date.
    #[default]
    Archive,
    /// The home page's top stories.
    Top,
}

pub struct ArchiveWalker<D: PageDriver> {
    driver: D,
    home_url: String,
    archive_url: String,
    selectors: CompiledSelectors,
    stats: WalkStats,
}

impl<D: PageDriver> ArchiveWalker<D> {
    pub fn new(driver: D, site: &SiteConfig, selectors: CompiledSelectors) -> Self {
        Self {
            driver,
            home_url: site.home_url.clone(),
            archive_url: site.archive_url.clone(),
            selectors,
            stats: WalkStats::default(),
        }
    }

    /// Run one walk and release the driver, whether or not the walk succeeded.
    ///
    /// Top-mode results are grouped by date like archive results so both
    /// modes feed the same store.
    #[instrument(level = "info", skip(self), fields(driver = self.driver.name()))]
    pub async fn run(mut self, mode: ScrapeMode) -> Result<ArticleCollection, ScrapeError> {
        let outcome = match mode {
            ScrapeMode::Archive => self.scrape_all_articles().await,
            ScrapeMode::Top => self
                .scrape_top_articles()
                .await
                .map(ArticleCollection::from_records),
        };

        if let Err(e) = outcome.as_ref() {
            error!(error = %e, "Walk aborted");
        }
        if let Err(e) = self.driver.close().await {
            warn!(error = %e, "Failed to close page driver");
        }
        info!(stats = ?self.stats, "Walk finished");

        outcome
    }

    /// Extract every top story linked from the home page.
    #[instrument(level = "info", skip(self))]
    pub async fn scrape_top_articles(&mut self) -> Result<Vec<ArticleRecord>, ScrapeError> {
        let urls = self
            .index_links(&self.home_url, &self.selectors.top_links)
            .await?;
        self.scrape_links(urls).await
    }

    /// Extract every article linked from the archive page, grouped by date.
    #[instrument(level = "info", skip(self))]
    pub async fn scrape_all_articles(&mut self) -> Result<ArticleCollection, ScrapeError> {
        let urls = self
            .index_links(&self.archive_url, &self.selectors.archive_links)
            .await?;
        let collection = ArticleCollection::from_records(self.scrape_links(urls).await?);

        info!(
            buckets = collection.buckets().len(),
            articles = collection.len(),
            "Grouped archive articles by date"
        );
        Ok(collection)
    }

    async fn index_links(
        &self,
        listing_url: &str,
        selector: &Selector,
    ) -> Result<Vec<String>, ScrapeError> {
        let html = self
            .driver
            .navigate(listing_url)
            .await
            .map_err(|source| ScrapeError::Navigation {
                url: listing_url.to_string(),
                source,
            })?;
        let urls = Page::parse(listing_url, &html)?.links(selector);

        info!(count = urls.len(), source = listing_url, "Indexed article URLs");
        debug!(urls = ?urls, "Listing URLs");
        Ok(urls)
    }

    async fn scrape_links(&mut self, urls: Vec<String>) -> Result<Vec<ArticleRecord>, ScrapeError> {
        let discovered = urls.len();
        let driver = &self.driver;
        let selectors = &self.selectors;

        let extractions: Vec<Extraction> = stream::iter(urls)
            .then(move |url| async move { scrape_article(driver, selectors, &url).await })
            .try_collect()
            .await?;

        let records: Vec<ArticleRecord> = extractions
            .into_iter()
            .filter_map(|extraction| match extraction {
                Extraction::Article(record) => Some(record),
                Extraction::Skipped { .. } => None,
            })
            .collect();

        let skipped = discovered - records.len();
        self.stats.discovered += discovered;
        self.stats.scraped += records.len();
        self.stats.skipped += skipped;

        info!(
            discovered,
            scraped = records.len(),
            skipped,
            "Finished listing page"
        );
        Ok(records)
    }
}
