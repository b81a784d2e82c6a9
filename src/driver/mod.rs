//! Page rendering and element queries.
//!
//! A [`PageDriver`] turns a URL into HTML. The walker owns one driver for the
//! whole run and closes it exactly once when the run ends. Element queries
//! happen on a [`Page`], which is parsed synchronously from the driver's HTML
//! so no DOM is held across an `.await`.
//!
//! # Drivers
//!
//! | Driver | Module | Notes |
//! |--------|--------|-------|
//! | Plain HTTP | [`http`] | `reqwest` GET, no JavaScript |
//! | Browserless | [`browserless`] | Fully rendered HTML via `/content` |

pub mod browserless;
pub mod http;

#[cfg(test)]
pub mod fixture;

use crate::error::{DriverError, ScrapeError};
use crate::normalize::clean_text;
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Something that can load a page and hand back its rendered HTML.
pub trait PageDriver {
    /// Human-readable driver name for logs.
    fn name(&self) -> &'static str;

    /// Load `url` and return the page source.
    async fn navigate(&self, url: &str) -> Result<String, DriverError>;

    /// Release whatever the driver holds. Called once at the end of a run.
    async fn close(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Elements that start a new line when rendered.
const LINE_BREAKING: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "section",
    "article", "header", "footer", "blockquote", "tr", "td", "th",
];

/// A loaded page that can be queried with CSS selectors.
pub struct Page {
    url: Url,
    document: Html,
}

impl Page {
    pub fn parse(url: &str, html: &str) -> Result<Self, ScrapeError> {
        let parsed = Url::parse(url).map_err(|source| ScrapeError::Url {
            url: url.to_string(),
            source,
        })?;
        Ok(Self {
            url: parsed,
            document: Html::parse_document(html),
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Cleaned text of the first element matching `selector`.
    pub fn text(&self, selector: &Selector) -> Option<String> {
        self.document
            .select(selector)
            .next()
            .map(|el| {
                let mut rendered = String::new();
                render_text(el, &mut rendered);
                clean_text(&rendered)
            })
    }

    /// Try each selector in turn and return the text of the first match.
    pub fn first_text(&self, selectors: &[Selector]) -> Option<String> {
        selectors.iter().find_map(|selector| self.text(selector))
    }

    /// Absolute `href`s of every element matching `selector`.
    ///
    /// Elements without an `href` are ignored, relative links are resolved
    /// against the page URL, anything that isn't http(s) (`javascript:`,
    /// `mailto:`) is dropped, and repeats are dropped keeping the first
    /// occurrence.
    pub fn links(&self, selector: &Selector) -> Vec<String> {
        self.document
            .select(selector)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(|href| self.url.join(href.trim()).ok())
            .filter(|resolved| matches!(resolved.scheme(), "http" | "https"))
            .map(|resolved| resolved.to_string())
            .unique()
            .collect()
    }
}

/// Collect text the way a browser lays it out: line-breaking elements are
/// separated from their neighbours by whitespace.
fn render_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let breaks = LINE_BREAKING.contains(&child_el.value().name());
            if breaks {
                out.push(' ');
            }
            render_text(child_el, out);
            if breaks {
                out.push(' ');
            }
        }
    }
}
