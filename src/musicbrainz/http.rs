use std::{sync::Arc, time::Duration};

use reqwest::{Client, Response};
use serde::Serialize;

use crate::musicbrainz::{
    CatalogError,
    rate_limit::{Clock, RateLimiter, TokioClock},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client whose every GET first takes a permit from a shared
/// [`RateLimiter`].
pub struct RateLimitedHttpClient<C: Clock = TokioClock> {
    http: Client,
    limiter: Arc<RateLimiter<C>>,
}

impl<C: Clock> RateLimitedHttpClient<C> {
    pub fn new(user_agent: &str, limiter: Arc<RateLimiter<C>>) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, limiter })
    }

    pub async fn get<Q>(&self, url: &str, query: &Q) -> Result<Response, CatalogError>
    where
        Q: Serialize + ?Sized,
    {
        self.limiter.wait().await;
        let response = self.http.get(url).query(query).send().await?;
        Ok(response)
    }

    pub fn limiter(&self) -> &Arc<RateLimiter<C>> {
        &self.limiter
    }
}
