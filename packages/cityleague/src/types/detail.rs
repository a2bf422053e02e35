//! Detail-page types: awarded decks and the per-event detail record.

use serde::{Deserialize, Serialize};

/// One awarded deck extracted from a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardedDeck {
    /// Rank label, empty when unknown
    pub rank: String,
    /// Absolute deck-recipe URL
    pub url: String,
}

/// Extracted detail for one event's result page chain.
///
/// `decks` is capped at the fetcher's configured maximum, deduplicated by
/// URL, in discovery order across pages. An empty `organizer` means "not
/// found", a valid displayable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    pub organizer: String,
    pub decks: Vec<AwardedDeck>,
}

impl EventDetail {
    pub fn new(organizer: impl Into<String>, decks: Vec<AwardedDeck>) -> Self {
        Self {
            organizer: organizer.into(),
            decks,
        }
    }
}
