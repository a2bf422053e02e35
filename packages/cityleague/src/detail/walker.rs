//! Pagination walker: drives deck extraction across a page chain.

use scraper::Html;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::detail::decks::{extract_decks, find_next_page};
use crate::error::LoadResult;
use crate::traits::loader::PageLoader;
use crate::types::detail::AwardedDeck;

/// Collect up to `max` awarded decks starting at `start`, following
/// next-page links.
///
/// Terminates when the cap is reached, no next link is found, or a next
/// link points at an already-followed URL (cycle guard). The accumulated
/// sequence is then deduplicated by deck URL, keeping the first
/// occurrence and its rank, in discovery order. Load errors propagate.
pub async fn collect_decks(
    loader: &dyn PageLoader,
    start: &Url,
    max: usize,
    timeout: Duration,
) -> LoadResult<Vec<AwardedDeck>> {
    let mut decks: Vec<AwardedDeck> = Vec::new();
    let mut current = Some(start.clone());
    let mut visited: HashSet<String> = HashSet::new();

    while let Some(url) = current.take() {
        if decks.len() >= max {
            break;
        }

        debug!(url = %url, collected = decks.len(), "walker visiting page");
        let html = loader.load(&url, timeout).await?;

        let next = {
            let doc = Html::parse_document(&html);
            let remaining = max - decks.len();
            decks.extend(extract_decks(&doc, &url, remaining));
            find_next_page(&doc, &url)
        };

        if decks.len() < max {
            if let Some(next) = next {
                if visited.insert(next.to_string()) {
                    current = Some(next);
                } else {
                    debug!(next = %next, "next page already followed, stopping");
                }
            }
        }
    }

    let mut seen = HashSet::new();
    decks.retain(|deck| seen.insert(deck.url.clone()));

    debug!(decks = decks.len(), pages = visited.len() + 1, "walker finished");
    Ok(decks)
}
