//! DetailCache trait: the per-URL memoization seam.

use async_trait::async_trait;

use crate::types::detail::EventDetail;

/// Keyed get/put store for fetched event details.
///
/// The cache is the only long-lived shared mutable resource in the
/// pipeline and must support concurrent reads and writes. Two concurrent
/// misses for the same URL may both fetch; last write wins.
///
/// Injected into `DetailFetcher` so tests can substitute an empty or
/// pre-seeded store without process-wide side effects.
#[async_trait]
pub trait DetailCache: Send + Sync {
    /// Return the stored detail for a URL, if any.
    async fn get(&self, url: &str) -> Option<EventDetail>;

    /// Store the detail for a URL, replacing any previous value.
    async fn put(&self, url: &str, detail: EventDetail);
}
