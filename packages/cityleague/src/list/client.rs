//! Concurrent paged client for the event-search endpoint.
//!
//! Each page is requested as an independent future; all futures are
//! created before any result is awaited and joined as a group. A page
//! whose body matches no known envelope shape degrades to an empty item
//! list plus a diagnostic; transport-level errors fail the whole fetch.

use futures::future::join_all;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::types::event::EventItem;

/// Base URL of the results site.
pub const DEFAULT_BASE_URL: &str = "https://players.pokemon-card.com";

/// Items per page; offsets advance in this stride.
pub const PAGE_SIZE: usize = 20;

const SEARCH_PATH: &str = "/event_search";
const RESULT_LIST_PATH: &str = "/event/result/list";
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
const ACCEPT: &str = "application/json, text/plain, */*";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_HEAD_BYTES: usize = 200;

/// Bare `{"event": [...]}` envelope (shape 1).
#[derive(Deserialize)]
struct EventListEnvelope {
    event: Vec<EventItem>,
}

/// Nested `{"data": {"event": [...]}}` envelope (shape 2).
#[derive(Deserialize)]
struct DataWrappedEnvelope {
    data: EventListEnvelope,
}

/// Which envelope shape a page body decoded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    List,
    DataWrapped,
    Array,
}

impl fmt::Display for EnvelopeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeShape::List => write!(f, "list"),
            EnvelopeShape::DataWrapped => write!(f, "wrapped"),
            EnvelopeShape::Array => write!(f, "array"),
        }
    }
}

/// Outcome of decoding one page body.
#[derive(Debug, Clone)]
pub enum DecodeOutcome {
    /// One of the known shapes matched
    Decoded { shape: EnvelopeShape, count: usize },
    /// No shape matched; the page degraded to an empty item list
    Fallthrough { body_head: String },
}

/// Per-page fetch diagnostic, rendered as one log line.
#[derive(Debug, Clone)]
pub struct PageDiagnostic {
    pub page: usize,
    pub status: u16,
    pub content_type: String,
    pub outcome: DecodeOutcome,
}

impl fmt::Display for PageDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            DecodeOutcome::Decoded { shape, count } => write!(
                f,
                "p{} {} status:{} ct:{} count:{}",
                self.page, shape, self.status, self.content_type, count
            ),
            DecodeOutcome::Fallthrough { body_head } => write!(
                f,
                "p{} decode fail status:{} ct:{} head:{}",
                self.page, self.status, self.content_type, body_head
            ),
        }
    }
}

/// Combined result of a multi-page fetch.
#[derive(Debug, Clone)]
pub struct ListFetch {
    /// Union of decoded items across all pages
    pub items: Vec<EventItem>,
    /// One diagnostic per requested page, in page order
    pub diagnostics: Vec<PageDiagnostic>,
}

/// Client for the paged event-search endpoint.
pub struct ListClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    page_size: usize,
}

impl Default for ListClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ListClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: MOBILE_USER_AGENT.to_string(),
            page_size: PAGE_SIZE,
        }
    }

    /// Override the base URL (for tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Fetch `pages` consecutive pages concurrently and combine their
    /// items. Per-page decode failures degrade to empty lists and are
    /// reported in the diagnostics; they never fail the fetch.
    pub async fn fetch_all_pages(&self, pages: usize) -> Result<ListFetch> {
        info!(pages, "list fetch starting");

        let requests: Vec<_> = (0..pages).map(|p| self.fetch_page(p)).collect();
        let results = join_all(requests).await;

        let mut items = Vec::new();
        let mut diagnostics = Vec::with_capacity(pages);
        for result in results {
            let (page_items, diagnostic) = result?;
            items.extend(page_items);
            diagnostics.push(diagnostic);
        }

        info!(pages, items = items.len(), "list fetch completed");
        Ok(ListFetch { items, diagnostics })
    }

    /// Fetch and decode one page.
    async fn fetch_page(&self, page: usize) -> Result<(Vec<EventItem>, PageDiagnostic)> {
        let response = self.page_request(page).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.text().await?;

        let (items, outcome) = match decode_event_items(&body) {
            Some((items, shape)) => {
                let count = items.len();
                (items, DecodeOutcome::Decoded { shape, count })
            }
            None => {
                warn!(page, status, content_type = %content_type, "no known envelope shape matched");
                (
                    Vec::new(),
                    DecodeOutcome::Fallthrough {
                        body_head: body_head(&body),
                    },
                )
            }
        };

        let diagnostic = PageDiagnostic {
            page,
            status,
            content_type,
            outcome,
        };
        debug!(diagnostic = %diagnostic, "page fetched");

        Ok((items, diagnostic))
    }

    /// Build the request for one page offset.
    fn page_request(&self, page: usize) -> reqwest::RequestBuilder {
        let offset = (page * self.page_size).to_string();

        self.client
            .get(format!("{}{}", self.base_url, SEARCH_PATH))
            .query(&[
                ("offset", offset.as_str()),
                // Newest first
                ("order", "4"),
                // Results published
                ("result_resist", "1"),
                ("event_type[]", "3:1"),
                ("event_type[]", "3:2"),
                ("event_type[]", "3:7"),
            ])
            .header("Accept", ACCEPT)
            .header("User-Agent", &self.user_agent)
            .header("Referer", format!("{}{}", self.base_url, RESULT_LIST_PATH))
            .header("X-Requested-With", "XMLHttpRequest")
    }
}

/// Decode a page body by trying the known envelope shapes in order.
///
/// The shapes are structurally disjoint, so a body decodes under exactly
/// one of them; the first success wins. `None` means fallthrough.
pub fn decode_event_items(body: &str) -> Option<(Vec<EventItem>, EnvelopeShape)> {
    if let Ok(r) = serde_json::from_str::<EventListEnvelope>(body) {
        return Some((r.event, EnvelopeShape::List));
    }
    if let Ok(r) = serde_json::from_str::<DataWrappedEnvelope>(body) {
        return Some((r.data.event, EnvelopeShape::DataWrapped));
    }
    if let Ok(r) = serde_json::from_str::<Vec<EventItem>>(body) {
        return Some((r, EnvelopeShape::Array));
    }
    None
}

/// First 200 bytes of a body, for fallthrough diagnostics.
fn body_head(body: &str) -> String {
    let end = body.len().min(BODY_HEAD_BYTES);
    String::from_utf8_lossy(&body.as_bytes()[..end]).into_owned()
}
