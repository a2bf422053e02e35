//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Heuristic misses (organizer
//! not found, zero decks, unknown JSON shape) are values, not errors.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during extraction operations.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Detail URL is syntactically invalid
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rendered page load failed
    #[error("load failed: {0}")]
    Load(#[from] LoadError),
}

/// Errors that can occur while loading a rendered page.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Rendering did not complete within the deadline
    #[error("timeout loading: {url}")]
    Timeout { url: String },

    /// Browser could not be launched
    #[error("browser launch failed: {0}")]
    Browser(#[source] BoxError),

    /// Navigation failed or never finished
    #[error("navigation failed: {url}")]
    Navigation {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The DOM serialization script failed or returned a non-string
    #[error("script evaluation failed: {url}")]
    Script {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The render worker died without settling the result
    #[error("render worker terminated unexpectedly")]
    WorkerTerminated,
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Result type alias for rendered page loads.
pub type LoadResult<T> = std::result::Result<T, LoadError>;
