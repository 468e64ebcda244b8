//! MusicBrainz web service client
//!
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! MusicBrainz requires a meaningful User-Agent and allows one request per
//! second, both enforced by the underlying [`RateLimitedHttpClient`].

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::{
    config::MusicBrainzConfig,
    musicbrainz::{
        CatalogError, MetadataCatalog,
        http::RateLimitedHttpClient,
        rate_limit::{Clock, RateLimiter, TokioClock},
    },
    stage,
    types::{ArtistCandidate, ArtistSearchResponse, ReleaseGroupPage, ReleaseGroupResponse, Stage},
};

/// Release group types requested from the catalog.
const RELEASE_GROUP_TYPES: &str = "album|ep";

pub struct MusicBrainzClient<C: Clock = TokioClock> {
    http: RateLimitedHttpClient<C>,
    base_url: String,
}

impl MusicBrainzClient<TokioClock> {
    pub fn new(musicbrainz: &MusicBrainzConfig) -> Result<Self, CatalogError> {
        let limiter = Arc::new(RateLimiter::new(musicbrainz.min_interval));
        Self::with_limiter(musicbrainz, limiter)
    }
}

impl<C: Clock> MusicBrainzClient<C> {
    pub fn with_limiter(
        musicbrainz: &MusicBrainzConfig,
        limiter: Arc<RateLimiter<C>>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            http: RateLimitedHttpClient::new(&musicbrainz.user_agent(), limiter)?,
            base_url: musicbrainz.api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T, Q>(&self, stage: Stage, url: &str, query: &Q) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let response = self.http.get(url, query).await?;

        let status = response.status();
        stage!(stage, "→ HTTP {}", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

impl<C: Clock> MetadataCatalog for MusicBrainzClient<C> {
    async fn search_artist(&self, name: &str) -> Result<Vec<ArtistCandidate>, CatalogError> {
        let url = format!("{}/artist/", self.base_url);
        let query = format!("artist:{}", name);

        let res: ArtistSearchResponse = self
            .get_json(
                Stage::Mbid,
                &url,
                &[("query", query.as_str()), ("fmt", "json")],
            )
            .await?;
        Ok(res.artists)
    }

    async fn release_groups(
        &self,
        artist_id: &str,
        offset: u64,
        limit: u32,
    ) -> Result<ReleaseGroupPage, CatalogError> {
        let url = format!("{}/release-group", self.base_url);
        let offset = offset.to_string();
        let limit = limit.to_string();

        let res: ReleaseGroupResponse = self
            .get_json(
                Stage::Albums,
                &url,
                &[
                    ("artist", artist_id),
                    ("type", RELEASE_GROUP_TYPES),
                    ("fmt", "json"),
                    ("limit", limit.as_str()),
                    ("offset", offset.as_str()),
                ],
            )
            .await?;
        Ok(res.into())
    }

    async fn pace(&self) {
        self.http.limiter().wait().await;
    }
}
