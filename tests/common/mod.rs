#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    future::{Future, ready},
    sync::Mutex,
    time::{Duration, Instant},
};

use spotsldl::{
    musicbrainz::{CatalogError, Clock, MetadataCatalog},
    spotify::{PlaylistSource, SourceError},
    types::{
        ArtistCandidate, Page, Playlist, PlaylistItem, PlaylistTracksRef, ReleaseGroup,
        ReleaseGroupPage, Track, TrackArtist,
    },
};

pub fn playlist(id: &str, name: &str, total: u64) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        tracks: Some(PlaylistTracksRef { total }),
    }
}

pub fn track(artists: &[&str]) -> PlaylistItem {
    PlaylistItem {
        track: Some(Track {
            name: Some("Some Track".to_string()),
            artists: Some(
                artists
                    .iter()
                    .map(|a| TrackArtist {
                        name: Some(a.to_string()),
                    })
                    .collect(),
            ),
        }),
    }
}

fn cursor_for(scope: &str, idx: usize) -> String {
    format!("https://api.test/{}?page={}", scope, idx)
}

fn page_index(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.rsplit("page=").next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Scripted playlist source. Playlist listing and every track listing are
/// split into the given pages, chained by cursors.
#[derive(Default)]
pub struct FakeSource {
    pub playlist_pages: Vec<Vec<Playlist>>,
    pub track_pages: HashMap<String, Vec<Vec<PlaylistItem>>>,
    /// (scope, page index) that answers with HTTP 500. Scope is `playlists`
    /// or a playlist id.
    pub failing_page: Option<(String, usize)>,
    pub fetches: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(playlist_pages: Vec<Vec<Playlist>>) -> Self {
        Self {
            playlist_pages,
            ..Default::default()
        }
    }

    pub fn with_tracks(mut self, playlist_id: &str, pages: Vec<Vec<PlaylistItem>>) -> Self {
        self.track_pages.insert(playlist_id.to_string(), pages);
        self
    }

    pub fn failing_at(mut self, scope: &str, page: usize) -> Self {
        self.failing_page = Some((scope.to_string(), page));
        self
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    fn serve<T: Clone>(
        &self,
        scope: &str,
        pages: Option<&Vec<Vec<T>>>,
        cursor: Option<&str>,
    ) -> Result<Page<T>, SourceError> {
        let idx = page_index(cursor);
        self.fetches
            .lock()
            .unwrap()
            .push(format!("{}#{}", scope, idx));

        if self.failing_page.as_ref() == Some(&(scope.to_string(), idx)) {
            return Err(SourceError::Status {
                status: 500,
                url: cursor_for(scope, idx),
                body: "internal error".to_string(),
            });
        }

        let empty = Vec::new();
        let pages = pages.unwrap_or(&empty);
        let items = pages.get(idx).cloned().unwrap_or_default();
        let next = (idx + 1 < pages.len()).then(|| cursor_for(scope, idx + 1));
        Ok(Page { items, next })
    }
}

impl PlaylistSource for FakeSource {
    fn playlists(
        &self,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<Page<Playlist>, SourceError>> {
        ready(self.serve("playlists", Some(&self.playlist_pages), cursor))
    }

    fn playlist_tracks(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<Page<PlaylistItem>, SourceError>> {
        ready(self.serve(playlist_id, self.track_pages.get(playlist_id), cursor))
    }
}

/// Scripted metadata catalog that records every call.
#[derive(Default)]
pub struct FakeCatalog {
    pub candidates: HashMap<String, Vec<ArtistCandidate>>,
    pub failing_searches: HashSet<String>,
    pub release_titles: HashMap<String, Vec<String>>,
    /// (artist id, offset) that answers with HTTP 503.
    pub failing_release_pages: HashSet<(String, u64)>,
    pub calls: Mutex<Vec<String>>,
    pub paces: Mutex<usize>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artist(mut self, name: &str, id: &str, score: u32) -> Self {
        self.candidates
            .entry(name.to_string())
            .or_default()
            .push(ArtistCandidate {
                id: id.to_string(),
                name: name.to_string(),
                score: Some(score),
            });
        self
    }

    pub fn with_albums(mut self, artist_id: &str, titles: &[&str]) -> Self {
        self.release_titles.insert(
            artist_id.to_string(),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn failing_search(mut self, name: &str) -> Self {
        self.failing_searches.insert(name.to_string());
        self
    }

    pub fn failing_release_page(mut self, artist_id: &str, offset: u64) -> Self {
        self.failing_release_pages
            .insert((artist_id.to_string(), offset));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paces(&self) -> usize {
        *self.paces.lock().unwrap()
    }
}

impl MetadataCatalog for FakeCatalog {
    fn search_artist(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<ArtistCandidate>, CatalogError>> {
        self.calls.lock().unwrap().push(format!("search:{}", name));

        let result = if self.failing_searches.contains(name) {
            Err(CatalogError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            Ok(self.candidates.get(name).cloned().unwrap_or_default())
        };
        ready(result)
    }

    fn release_groups(
        &self,
        artist_id: &str,
        offset: u64,
        limit: u32,
    ) -> impl Future<Output = Result<ReleaseGroupPage, CatalogError>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("release-groups:{}@{}", artist_id, offset));

        let result = if self
            .failing_release_pages
            .contains(&(artist_id.to_string(), offset))
        {
            Err(CatalogError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            let titles = self
                .release_titles
                .get(artist_id)
                .cloned()
                .unwrap_or_default();
            let release_groups = titles
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .map(|t| ReleaseGroup {
                    id: None,
                    title: t.clone(),
                    primary_type: Some("Album".to_string()),
                })
                .collect();
            Ok(ReleaseGroupPage {
                release_groups,
                total: titles.len() as u64,
            })
        };
        ready(result)
    }

    fn pace(&self) -> impl Future<Output = ()> {
        *self.paces.lock().unwrap() += 1;
        ready(())
    }
}

/// Clock that only moves when slept on or advanced by hand.
pub struct ManualClock {
    start: Instant,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock().unwrap() += by;
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.sleeps.lock().unwrap().push(duration);
        self.advance(duration);
        ready(())
    }
}
