use std::fmt;

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Sentinel used for tracks whose artist names are missing.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Stage tag of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Auth,
    Spotify,
    Filter,
    Process,
    Mbid,
    Albums,
    Album,
    Skip,
    Write,
    Error,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "START",
            Stage::Auth => "AUTH",
            Stage::Spotify => "SPOTIFY",
            Stage::Filter => "FILTER",
            Stage::Process => "PROCESS",
            Stage::Mbid => "MBID",
            Stage::Albums => "ALBUMS",
            Stage::Album => "ALBUM",
            Stage::Skip => "SKIP",
            Stage::Write => "WRITE",
            Stage::Error => "ERROR",
            Stage::Done => "DONE",
        }
    }

    pub fn painted(&self) -> ColoredString {
        match self {
            Stage::Error => self.as_str().red().bold(),
            Stage::Skip => self.as_str().yellow().bold(),
            Stage::Write | Stage::Done => self.as_str().green().bold(),
            _ => self.as_str().blue().bold(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a cursor paginated listing.
///
/// `next` is the cursor of the following page, `None` once the listing is
/// exhausted.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

// Spotify Web API

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

impl<T> From<Paging<T>> for Page<T> {
    fn from(paging: Paging<T>) -> Self {
        Page {
            items: paging.items,
            next: paging.next,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Option<PlaylistTracksRef>,
}

impl Playlist {
    pub fn total_tracks(&self) -> u64 {
        self.tracks.as_ref().map_or(0, |t| t.total)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub name: Option<String>,
    pub artists: Option<Vec<TrackArtist>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: Option<String>,
}

// MusicBrainz web service

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResponse {
    #[serde(default)]
    pub artists: Vec<ArtistCandidate>,
}

/// A ranked result of an artist search. The catalog orders candidates by
/// descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistCandidate {
    pub id: String,
    pub name: String,
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseGroupResponse {
    #[serde(rename = "release-group-count")]
    pub release_group_count: Option<u64>,
    #[serde(rename = "release-groups", default)]
    pub release_groups: Vec<ReleaseGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseGroup {
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "primary-type")]
    pub primary_type: Option<String>,
}

/// One page of release groups together with the total the catalog reports.
#[derive(Debug, Clone, Default)]
pub struct ReleaseGroupPage {
    pub release_groups: Vec<ReleaseGroup>,
    pub total: u64,
}

impl From<ReleaseGroupResponse> for ReleaseGroupPage {
    fn from(res: ReleaseGroupResponse) -> Self {
        let total = res
            .release_group_count
            .unwrap_or(res.release_groups.len() as u64);
        ReleaseGroupPage {
            release_groups: res.release_groups,
            total,
        }
    }
}

/// What happened to one accepted artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Written(usize),
    NoIdentity,
    NoAlbums,
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionOutcome::Written(_) => f.write_str("written"),
            ResolutionOutcome::NoIdentity => f.write_str("no MBID found"),
            ResolutionOutcome::NoAlbums => f.write_str("no albums found"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtistResolution {
    pub artist: String,
    pub outcome: ResolutionOutcome,
}

#[derive(Tabled)]
pub struct ResolutionTableRow {
    pub artist: String,
    pub albums: usize,
    pub outcome: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
}
