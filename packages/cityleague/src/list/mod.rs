//! Event-list retrieval: paged endpoint client and link normalizer.

pub mod client;
pub mod normalize;
