//! Article page extraction.
//!
//! Pulls headline, timestamp and author out of a single article page and
//! normalizes them into an [`ArticleRecord`].
//!
//! # Failure modes
//!
//! | Condition | Result |
//! |-----------|--------|
//! | No timestamp element, or it doesn't parse | [`Extraction::Skipped`] |
//! | No headline element (any selector) | [`ScrapeError::MissingHeadline`] |
//! | No author element | [`ScrapeError::MissingAuthor`] |
//! | Page fails to load | [`ScrapeError::Navigation`] |

use crate::config::CompiledSelectors;
use crate::driver::{Page, PageDriver};
use crate::error::ScrapeError;
use crate::models::{ArticleRecord, Extraction};
use crate::normalize::{normalize_author, normalize_date, normalize_headline};
use crate::utils::truncate_for_log;
use tracing::{info, instrument, warn};

/// Load `url` through the driver and extract its record.
#[instrument(level = "info", skip(driver, selectors), fields(driver = driver.name()))]
pub async fn scrape_article<D: PageDriver>(
    driver: &D,
    selectors: &CompiledSelectors,
    url: &str,
) -> Result<Extraction, ScrapeError> {
    let html = driver
        .navigate(url)
        .await
        .map_err(|source| ScrapeError::Navigation {
            url: url.to_string(),
            source,
        })?;
    let page = Page::parse(url, &html)?;
    let extraction = extract_article(&page, selectors)?;

    match &extraction {
        Extraction::Article(record) => info!(
            headline = %truncate_for_log(&record.headline, 120),
            date = %record.date,
            "Scraped article"
        ),
        Extraction::Skipped { url, reason } => warn!(%url, %reason, "Skipping article"),
    }

    Ok(extraction)
}

/// Extract a record from an already loaded page.
pub fn extract_article(
    page: &Page,
    selectors: &CompiledSelectors,
) -> Result<Extraction, ScrapeError> {
    // Feature stories and regular posts put the headline in different markup.
    let raw_headline = page
        .first_text(&selectors.headline)
        .ok_or_else(|| ScrapeError::MissingHeadline {
            url: page.url().to_string(),
        })?;
    let headline = normalize_headline(&raw_headline);

    let Some(raw_timestamp) = page.text(&selectors.timestamp) else {
        return Ok(Extraction::Skipped {
            url: page.url().to_string(),
            reason: format!("no timestamp element for {headline}"),
        });
    };
    let date = match normalize_date(&raw_timestamp) {
        Ok(date) => date,
        Err(e) => {
            return Ok(Extraction::Skipped {
                url: page.url().to_string(),
                reason: format!("unreadable timestamp for {headline}: {e}"),
            });
        }
    };

    let raw_author = page
        .text(&selectors.author)
        .ok_or_else(|| ScrapeError::MissingAuthor {
            url: page.url().to_string(),
        })?;
    let author = normalize_author(&raw_author);

    Ok(Extraction::Article(ArticleRecord::new(
        page.url().to_string(),
        headline,
        author,
        date,
    )))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::driver::fixture::FixtureDriver;
    use crate::error::DriverError;

    /// Article page markup in the shape The Verge serves.
    pub(crate) fn article_html(headline: &str, timestamp: Option<&str>, author: &str) -> String {
        let time = timestamp
            .map(|t| format!(r#"<time class="duet--article--timestamp">{t}</time>"#))
            .unwrap_or_default();
        format!(
            r#"<html><body>
                <h1 class="mb-28">{headline}</h1>
                <div>
                  <span class="font-medium">By</span>
                  <span class="font-medium"><a href="/authors/x">{author}</a></span>
                </div>
                {time}
            </body></html>"#
        )
    }

    fn selectors() -> CompiledSelectors {
        CompiledSelectors::compile(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_regular_article() {
        let html = article_html(
            "Apple\u{2019}s new phone\u{2014}reviewed",
            Some("Updated Mar 4, 2024, 10:00 AM EST"),
            "JANE DOE",
        );
        let page = Page::parse("https://www.theverge.com/2024/3/4/phone", &html).unwrap();

        let extraction = extract_article(&page, &selectors()).unwrap();
        assert_eq!(
            extraction,
            Extraction::Article(ArticleRecord::new(
                "https://www.theverge.com/2024/3/4/phone".to_string(),
                "\"Apple's new phone-reviewed\"".to_string(),
                "Jane Doe".to_string(),
                "03/04/2024".to_string(),
            ))
        );
    }

    #[test]
    fn test_feature_headline_takes_priority() {
        let html = r#"<html><body>
            <h1 class="duet--article--feature-headline">Feature title</h1>
            <h1 class="mb-28">Regular title</h1>
            <div><span class="font-medium">By</span><span class="font-medium"><a>ALEX</a></span></div>
            <time class="duet--article--timestamp">Jan 2, 2025, 8:00 AM</time>
        </body></html>"#;
        let page = Page::parse("https://www.theverge.com/features/1", html).unwrap();

        match extract_article(&page, &selectors()).unwrap() {
            Extraction::Article(record) => {
                assert_eq!(record.headline, "\"Feature title\"");
                assert_eq!(record.author, "Alex");
                assert_eq!(record.date, "01/02/2025");
            }
            other => panic!("expected article, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_timestamp_is_skipped() {
        let html = article_html("No date here", None, "SOMEONE");
        let page = Page::parse("https://www.theverge.com/x", &html).unwrap();

        assert!(matches!(
            extract_article(&page, &selectors()).unwrap(),
            Extraction::Skipped { url, .. } if url == "https://www.theverge.com/x"
        ));
    }

    #[test]
    fn test_unparseable_timestamp_is_skipped() {
        let html = article_html("Old post", Some("2 hours ago"), "SOMEONE");
        let page = Page::parse("https://www.theverge.com/x", &html).unwrap();

        assert!(matches!(
            extract_article(&page, &selectors()).unwrap(),
            Extraction::Skipped { .. }
        ));
    }

    #[test]
    fn test_missing_headline_is_fatal() {
        let html = r#"<html><body><time class="duet--article--timestamp">Mar 4, 2024</time></body></html>"#;
        let page = Page::parse("https://www.theverge.com/x", html).unwrap();

        assert!(matches!(
            extract_article(&page, &selectors()),
            Err(ScrapeError::MissingHeadline { .. })
        ));
    }

    #[test]
    fn test_missing_author_is_fatal() {
        let html = r#"<html><body>
            <h1 class="mb-28">Title</h1>
            <time class="duet--article--timestamp">Mar 4, 2024</time>
        </body></html>"#;
        let page = Page::parse("https://www.theverge.com/x", html).unwrap();

        assert!(matches!(
            extract_article(&page, &selectors()),
            Err(ScrapeError::MissingAuthor { .. })
        ));
    }

    #[tokio::test]
    async fn test_scrape_article_navigation_failure() {
        let driver = FixtureDriver::new();
        let err = scrape_article(&driver, &selectors(), "https://www.theverge.com/gone")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::Navigation {
                source: DriverError::Api { status: 404, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_scrape_article_through_driver() {
        let url = "https://www.theverge.com/2024/3/4/phone";
        let driver = FixtureDriver::new().with_page(
            url,
            article_html("Headline", Some("Mar 4, 2024, 10:00am"), "JANE DOE"),
        );

        let extraction = scrape_article(&driver, &selectors(), url).await.unwrap();
        assert!(matches!(extraction, Extraction::Article(ref r) if r.url == url));
        assert_eq!(driver.visited(), vec![url.to_string()]);
    }
}
