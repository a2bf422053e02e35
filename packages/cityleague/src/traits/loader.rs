//! PageLoader trait: the rendered-page acquisition seam.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::error::LoadResult;

/// Loads the fully client-side-rendered HTML for a URL.
///
/// Implementations must serialize the post-script DOM, not the raw
/// response body, and must settle exactly once per call: whichever of
/// {render success, render failure, timeout} happens first wins, and any
/// late outcome is discarded. Each call uses an isolated rendering
/// context that leaves no cookie/storage residue.
///
/// Implementations:
/// - `ChromeLoader` - headless Chrome, one browser per call
/// - `MockLoader` (in `testing`) - canned pages for tests
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Load the rendered document at `url`, failing with
    /// `LoadError::Timeout` if rendering does not complete in time.
    async fn load(&self, url: &Url, timeout: Duration) -> LoadResult<String>;

    /// Loader name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
