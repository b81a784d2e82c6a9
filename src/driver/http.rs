//! Plain HTTP page driver.
//!
//! Fetches page source with a single GET. Pages that build their markup in
//! JavaScript come back incomplete; use the Browserless driver for those.

use super::PageDriver;
use crate::config::DriverConfig;
use crate::error::DriverError;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct HttpDriver {
    client: reqwest::Client,
}

impl HttpDriver {
    pub fn new(config: &DriverConfig) -> Result<Self, DriverError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl PageDriver for HttpDriver {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(level = "debug", skip(self))]
    async fn navigate(&self, url: &str) -> Result<String, DriverError> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(DriverError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
