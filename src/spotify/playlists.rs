use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config::SpotifyConfig,
    spotify::{PlaylistSource, SourceError},
    types::{CurrentUser, Page, Paging, Playlist, PlaylistItem},
};

const PLAYLIST_PAGE_SIZE: u32 = 50;
const TRACK_PAGE_SIZE: u32 = 100;

/// Spotify Web API client bound to one access token.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(spotify: &SpotifyConfig, token: String) -> Self {
        Self {
            http: Client::new(),
            api_url: spotify.api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Returns the profile of the user the token belongs to.
    pub async fn current_user(&self) -> Result<CurrentUser, SourceError> {
        let url = format!("{uri}/me", uri = self.api_url);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}

impl PlaylistSource for SpotifyClient {
    async fn playlists(&self, cursor: Option<&str>) -> Result<Page<Playlist>, SourceError> {
        let url = match cursor {
            Some(next) => next.to_string(),
            None => format!(
                "{uri}/me/playlists?limit={limit}",
                uri = self.api_url,
                limit = PLAYLIST_PAGE_SIZE
            ),
        };

        let page = self.get_json::<Paging<Playlist>>(&url).await?;
        Ok(page.into())
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<Page<PlaylistItem>, SourceError> {
        let url = match cursor {
            Some(next) => next.to_string(),
            None => format!(
                "{uri}/playlists/{id}/tracks?limit={limit}&fields=items(track(name,artists(name))),next,total",
                uri = self.api_url,
                id = playlist_id,
                limit = TRACK_PAGE_SIZE
            ),
        };

        let page = self.get_json::<Paging<PlaylistItem>>(&url).await?;
        Ok(page.into())
    }
}
