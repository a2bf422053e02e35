//! City League Results Extraction Library
//!
//! Collects tournament-result metadata and per-event awarded-deck
//! listings from a paginated, JavaScript-rendered results site,
//! normalizes the data, and exposes it for display.
//!
//! The pipeline has three stages:
//!
//! - the list stage queries the search endpoint across page offsets
//!   concurrently, reconciling the several JSON envelope shapes the
//!   endpoint is known to return, and normalizes the decoded items into
//!   deduplicated, date-sorted links;
//! - the load stage acquires the post-script DOM of a result page
//!   through an isolated headless-browser context under a hard deadline;
//! - the detail stage extracts the organizer and ranked deck links with
//!   ordered fallback strategies, follows pagination with a cycle guard,
//!   and memoizes the result per URL.
//!
//! Extraction is best-effort: a field the heuristics cannot find is an
//! empty value, not an error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cityleague::{ChromeLoader, DetailFetcher, ListClient, MemoryStore, normalize};
//!
//! let client = ListClient::new();
//! let fetched = client.fetch_all_pages(5).await?;
//! let links = normalize(&fetched.items);
//!
//! let fetcher = DetailFetcher::new(Arc::new(ChromeLoader::new()), Arc::new(MemoryStore::new()));
//! let detail = fetcher.fetch(&links[0].url).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (PageLoader, DetailCache)
//! - [`types`] - Domain data types
//! - [`list`] - Paged endpoint client and link normalizer
//! - [`detail`] - Parsers, pagination walker, and fetch orchestrator
//! - [`loaders`] - Rendered-page loader implementations
//! - [`stores`] - Cache implementations
//! - [`testing`] - Mock implementations for testing

pub mod detail;
pub mod error;
pub mod list;
pub mod loaders;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractError, LoadError, LoadResult, Result};
pub use traits::{loader::PageLoader, store::DetailCache};
pub use types::{
    detail::{AwardedDeck, EventDetail},
    event::{detail_url, CityLeagueLink, EventItem, LeagueCategory},
};

// Re-export the list stage
pub use list::{
    client::{
        decode_event_items, DecodeOutcome, EnvelopeShape, ListClient, ListFetch, PageDiagnostic,
        DEFAULT_BASE_URL, PAGE_SIZE,
    },
    normalize::{is_city_league, normalize, CITY_MARKER},
};

// Re-export the detail stage
pub use detail::{
    decks::{extract_decks, find_next_page},
    fetcher::{DetailFetcher, DEFAULT_MAX_DECKS, DEFAULT_RENDER_TIMEOUT, DEFAULT_START_DELAY},
    organizer::extract_organizer,
    text::{clean_date_noise, collapse_ws, keep_shop_name},
    walker::collect_decks,
};

// Re-export loaders and stores
pub use loaders::ChromeLoader;
pub use stores::MemoryStore;

// Re-export testing utilities
pub use testing::MockLoader;
