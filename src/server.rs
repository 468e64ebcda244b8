use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Res, api, config::SpotifyConfig, types::PkceToken};

/// Routes of the local OAuth server. The PKCE state and the Spotify settings
/// reach the handlers as extensions.
pub fn router(state: Arc<Mutex<Option<PkceToken>>>, spotify: SpotifyConfig) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(spotify))
}

/// Serves `/health` and the OAuth `/callback` on the configured address until
/// the process ends.
pub async fn start_api_server(
    state: Arc<Mutex<Option<PkceToken>>>,
    spotify: SpotifyConfig,
) -> Res<()> {
    let addr = SocketAddr::from_str(&spotify.server_addr)
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let app = router(state, spotify);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
