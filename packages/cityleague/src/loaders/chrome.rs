//! Headless-Chrome page loader.
//!
//! Captures the post-script DOM serialization of a page, not the raw
//! response body. Each call launches a fresh browser with its own
//! temporary profile, so loads share no cookie or storage state and leave
//! no residue; the browser is torn down when the render worker finishes.

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;
use url::Url;

use crate::error::{LoadError, LoadResult};
use crate::traits::loader::PageLoader;

/// Script evaluated after navigation to serialize the rendered document.
const SERIALIZE_DOM: &str = "document.documentElement.outerHTML.toString()";

/// Rendered-page loader backed by headless Chrome.
///
/// Rendering runs on a blocking worker; the async side races the worker's
/// result against the timeout. Whichever settles first wins and the other
/// outcome is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeLoader;

impl ChromeLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageLoader for ChromeLoader {
    async fn load(&self, url: &Url, timeout: Duration) -> LoadResult<String> {
        let (tx, rx) = oneshot::channel();
        let target = url.to_string();

        tokio::task::spawn_blocking(move || {
            // A dropped receiver means the call already settled; the late
            // result is discarded here.
            let _ = tx.send(render_document(&target));
        });

        settle(url.as_str(), rx, timeout).await
    }

    fn name(&self) -> &str {
        "chrome"
    }
}

/// Race a render result against the timeout, settling exactly once.
///
/// The oneshot channel is the "already settled" guard: once the timeout
/// branch wins, the receiver is dropped and any late send fails silently.
pub(crate) async fn settle(
    url: &str,
    rx: oneshot::Receiver<LoadResult<String>>,
    timeout: Duration,
) -> LoadResult<String> {
    tokio::select! {
        outcome = rx => match outcome {
            Ok(result) => result,
            Err(_) => Err(LoadError::WorkerTerminated),
        },
        _ = tokio::time::sleep(timeout) => {
            debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "render timed out");
            Err(LoadError::Timeout { url: url.to_string() })
        }
    }
}

/// Launch a browser, navigate, and serialize the rendered DOM.
fn render_document(url: &str) -> LoadResult<String> {
    let browser = Browser::new(LaunchOptions {
        headless: true,
        ..Default::default()
    })
    .map_err(|e| LoadError::Browser(e.into()))?;

    let tab = browser.new_tab().map_err(|e| LoadError::Browser(e.into()))?;

    tab.navigate_to(url).map_err(|e| LoadError::Navigation {
        url: url.to_string(),
        source: e.into(),
    })?;
    tab.wait_until_navigated().map_err(|e| LoadError::Navigation {
        url: url.to_string(),
        source: e.into(),
    })?;

    let evaluated = tab
        .evaluate(SERIALIZE_DOM, false)
        .map_err(|e| LoadError::Script {
            url: url.to_string(),
            source: e.into(),
        })?;

    match evaluated.value {
        Some(serde_json::Value::String(html)) => Ok(html),
        other => Err(LoadError::Script {
            url: url.to_string(),
            source: format!("expected string from DOM serialization, got {:?}", other).into(),
        }),
    }
}
