//! # Spotify Integration Module
//!
//! Read-only access to the user's playlists through the Spotify Web API, plus
//! the OAuth 2.0 PKCE flow that obtains the access token.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline (PlaylistArtistCollector)
//!          ↓
//! PlaylistSource trait
//!          ↓
//! SpotifyClient (reqwest, bearer token)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The collector only sees [`PlaylistSource`], so tests can walk scripted
//! pages without a network.
//!
//! ## Pagination
//!
//! Both listings are cursor based. The cursor is the absolute `next` URL the
//! API returns with every page; `None` asks for the first page. A listing ends
//! when a page comes back without `next`.
//!
//! ## Error Handling
//!
//! A failed page fetch is a [`SourceError`], never an empty page. Callers can
//! therefore tell "no more pages" apart from "could not fetch the next page"
//! and abort instead of silently working on a truncated artist set.
//!
//! ## API Coverage
//!
//! - `GET /me` - Authenticated user, logged once per run
//! - `GET /me/playlists` - User's playlists, 50 per page
//! - `GET /playlists/{id}/tracks` - Playlist items, 100 per page
//! - `POST /api/token` - Code exchange and refresh

use std::{fmt, future::Future};

use crate::types::{Page, Playlist, PlaylistItem};

pub mod auth;
mod playlists;

pub use playlists::SpotifyClient;

#[derive(Debug)]
pub enum SourceError {
    Status { status: u16, url: String, body: String },
    Transport(reqwest::Error),
    Decode(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Transport(err)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Status { status, url, body } => {
                write!(f, "HTTP {} for {}: {}", status, url, body)
            }
            SourceError::Transport(e) => write!(f, "request failed: {}", e),
            SourceError::Decode(e) => write!(f, "unexpected response: {}", e),
        }
    }
}

impl std::error::Error for SourceError {}

/// Paginated, read-only listing of a user's playlists and their items.
pub trait PlaylistSource {
    /// Fetches one page of the user's playlists.
    fn playlists(
        &self,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<Page<Playlist>, SourceError>>;

    /// Fetches one page of the items of `playlist_id`.
    fn playlist_tracks(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<Page<PlaylistItem>, SourceError>>;
}
