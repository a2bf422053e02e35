//! Mock implementations for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{LoadError, LoadResult};
use crate::traits::loader::PageLoader;
use url::Url;

/// Mock page loader with canned documents.
///
/// Allows configuring per-URL HTML, artificial render delays (to exercise
/// timeout paths), and forced failures, and records every load call for
/// verification.
///
/// # Example
///
/// ```rust,ignore
/// use cityleague::testing::MockLoader;
///
/// let loader = MockLoader::new()
///     .with_page("https://example.com/result", "<html>...</html>");
/// ```
#[derive(Default)]
pub struct MockLoader {
    pages: Arc<RwLock<HashMap<String, String>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    load_calls: Arc<RwLock<Vec<String>>>,
}

impl MockLoader {
    /// Create a new empty mock loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned page.
    pub fn add_page(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), html.into());
    }

    /// Add a canned page (builder form).
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.add_page(url, html);
        self
    }

    /// Delay a URL's render by `delay`. A delay at or beyond the caller's
    /// timeout resolves as a timeout error instead.
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(url.into(), delay);
        self
    }

    /// Make a URL fail with a navigation error.
    pub fn with_failure(self, url: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(url.into());
        self
    }

    /// Number of load calls made so far.
    pub fn load_call_count(&self) -> usize {
        self.load_calls.read().unwrap().len()
    }

    /// URLs requested, in call order.
    pub fn load_calls(&self) -> Vec<String> {
        self.load_calls.read().unwrap().clone()
    }

    /// Clear recorded calls.
    pub fn reset_calls(&self) {
        self.load_calls.write().unwrap().clear();
    }
}

impl Clone for MockLoader {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            delays: Arc::clone(&self.delays),
            failing: Arc::clone(&self.failing),
            load_calls: Arc::clone(&self.load_calls),
        }
    }
}

#[async_trait]
impl PageLoader for MockLoader {
    async fn load(&self, url: &Url, timeout: Duration) -> LoadResult<String> {
        let key = url.to_string();
        self.load_calls.write().unwrap().push(key.clone());

        let delay = self.delays.read().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            if delay >= timeout {
                tokio::time::sleep(timeout).await;
                return Err(LoadError::Timeout { url: key });
            }
            tokio::time::sleep(delay).await;
        }

        if self.failing.read().unwrap().contains(&key) {
            return Err(LoadError::Navigation {
                url: key,
                source: "canned navigation failure".into(),
            });
        }

        let page = self.pages.read().unwrap().get(&key).cloned();
        match page {
            Some(html) => Ok(html),
            None => Err(LoadError::Navigation {
                url: key,
                source: "no canned page for URL".into(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
