//! # MusicBrainz Integration Module
//!
//! Resolves artist names to MusicBrainz artist IDs (MBIDs) and lists their
//! album and EP release groups.
//!
//! ```text
//! MetadataResolver
//!          ↓
//! MetadataCatalog trait
//!          ↓
//! MusicBrainzClient
//!          ↓
//! RateLimitedHttpClient ── RateLimiter ── Clock
//!          ↓
//! MusicBrainz web service
//! ```
//!
//! All requests of one run share a single [`RateLimiter`]. It is also handed
//! out through [`MetadataCatalog::pace`] so that the resolver can spend one
//! interval per emitted album without issuing a request.

use std::{fmt, future::Future};

use crate::types::{ArtistCandidate, ReleaseGroupPage};

mod client;
mod http;
mod rate_limit;

pub use client::MusicBrainzClient;
pub use http::RateLimitedHttpClient;
pub use rate_limit::{Clock, RateLimiter, TokioClock};

#[derive(Debug)]
pub enum CatalogError {
    Status { status: u16, body: String },
    Transport(reqwest::Error),
    Decode(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Transport(err)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Status { status, body } => write!(f, "HTTP {}: {}", status, body),
            CatalogError::Transport(e) => write!(f, "request failed: {}", e),
            CatalogError::Decode(e) => write!(f, "unexpected response: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only music metadata catalog.
pub trait MetadataCatalog {
    /// Searches artists by name. Candidates come back ranked by the catalog,
    /// best match first.
    fn search_artist(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<ArtistCandidate>, CatalogError>>;

    /// Lists one page of album and EP release groups of `artist_id`.
    fn release_groups(
        &self,
        artist_id: &str,
        offset: u64,
        limit: u32,
    ) -> impl Future<Output = Result<ReleaseGroupPage, CatalogError>>;

    /// Spends one rate limit interval without issuing a request.
    fn pace(&self) -> impl Future<Output = ()>;
}
