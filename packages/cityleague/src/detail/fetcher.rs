//! Detail fetch orchestrator with per-URL memoization.

use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::detail::organizer::extract_organizer;
use crate::detail::walker::collect_decks;
use crate::error::{ExtractError, Result};
use crate::traits::loader::PageLoader;
use crate::traits::store::DetailCache;
use crate::types::detail::EventDetail;

/// Default deadline for one rendered page load.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(50);

/// Default stagger before a detail fetch hits the network, so many rows
/// becoming visible at once do not all start rendering simultaneously.
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(200);

/// Default cap on awarded decks per event.
pub const DEFAULT_MAX_DECKS: usize = 16;

/// Fetches and memoizes event details.
///
/// On a cache hit the stored value is returned with no network activity.
/// On a miss the rendered start page is loaded, the organizer extracted
/// from it, and the pagination walker run from the same URL; the result
/// is stored keyed by the detail URL. Failures propagate to the caller
/// and are not cached, so a later call retries.
pub struct DetailFetcher {
    loader: Arc<dyn PageLoader>,
    cache: Arc<dyn DetailCache>,
    timeout: Duration,
    start_delay: Duration,
    max_decks: usize,
}

impl DetailFetcher {
    /// Create a fetcher with default timing and cap settings.
    pub fn new(loader: Arc<dyn PageLoader>, cache: Arc<dyn DetailCache>) -> Self {
        Self {
            loader,
            cache,
            timeout: DEFAULT_RENDER_TIMEOUT,
            start_delay: DEFAULT_START_DELAY,
            max_decks: DEFAULT_MAX_DECKS,
        }
    }

    /// Set the rendered-load deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pre-fetch stagger delay.
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Set the awarded-deck cap.
    pub fn with_max_decks(mut self, max: usize) -> Self {
        self.max_decks = max;
        self
    }

    /// Fetch the detail for one result-page URL, or return the cached
    /// value.
    pub async fn fetch(&self, detail_url: &str) -> Result<EventDetail> {
        if let Some(detail) = self.cache.get(detail_url).await {
            debug!(url = %detail_url, "detail cache hit");
            return Ok(detail);
        }

        let url = Url::parse(detail_url).map_err(|_| ExtractError::InvalidUrl {
            url: detail_url.to_string(),
        })?;

        if !self.start_delay.is_zero() {
            tokio::time::sleep(self.start_delay).await;
        }

        info!(url = %url, loader = self.loader.name(), "detail fetch starting");

        let html = match self.loader.load(&url, self.timeout).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "detail fetch failed");
                return Err(e.into());
            }
        };
        let organizer = {
            let doc = Html::parse_document(&html);
            extract_organizer(&doc)
        };
        let decks = collect_decks(self.loader.as_ref(), &url, self.max_decks, self.timeout).await?;

        let detail = EventDetail::new(organizer, decks);
        self.cache.put(detail_url, detail.clone()).await;

        info!(url = %url, decks = detail.decks.len(), "detail fetch completed");
        Ok(detail)
    }
}
