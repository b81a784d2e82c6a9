//! In-memory driver serving canned HTML, for tests.

use super::PageDriver;
use crate::error::DriverError;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct FixtureDriver {
    pages: HashMap<String, String>,
    visited: Mutex<Vec<String>>,
    closes: Arc<AtomicUsize>,
}

impl FixtureDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Shared counter of `close()` calls, readable after the driver is moved.
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl PageDriver for FixtureDriver {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn navigate(&self, url: &str) -> Result<String, DriverError> {
        self.visited.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| DriverError::Api {
            status: 404,
            message: format!("no fixture for {url}"),
        })
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
