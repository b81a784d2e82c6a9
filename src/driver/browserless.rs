//! Browserless page driver.
//!
//! Posts the target URL to a Browserless `/content` endpoint, which loads it
//! in headless Chrome and returns the HTML after scripts have run.

use super::PageDriver;
use crate::config::DriverConfig;
use crate::error::DriverError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, instrument};

pub struct BrowserlessDriver {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    pages_loaded: AtomicUsize,
}

impl BrowserlessDriver {
    pub fn new(config: &DriverConfig) -> Result<Self, DriverError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.browserless_url.trim_end_matches('/').to_string(),
            token: config.browserless_token.clone(),
            pages_loaded: AtomicUsize::new(0),
        })
    }

    fn endpoint(&self) -> String {
        let mut endpoint = format!("{}/content", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={}", urlencoding::encode(token)));
        }
        endpoint
    }
}

impl PageDriver for BrowserlessDriver {
    fn name(&self) -> &'static str {
        "browserless"
    }

    #[instrument(level = "debug", skip(self))]
    async fn navigate(&self, url: &str) -> Result<String, DriverError> {
        let body = serde_json::json!({ "url": url });

        let resp = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(DriverError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let html = resp.text().await?;
        self.pages_loaded.fetch_add(1, Ordering::Relaxed);
        debug!(bytes = html.len(), "Rendered page");
        Ok(html)
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        info!(
            base_url = %self.base_url,
            pages_loaded = self.pages_loaded.load(Ordering::Relaxed),
            "Closing Browserless session"
        );
        Ok(())
    }
}
