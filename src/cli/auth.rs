use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Config,
    error,
    management::TokenManager,
    spotify::{self, SpotifyClient},
    stage, success,
    types::{PkceToken, Stage},
};

/// Runs the PKCE flow and stores the token in the local cache.
pub async fn auth(config: &Config) {
    stage!(Stage::Auth, "Starting Spotify authentication...");

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    let token = match spotify::auth::auth(shared_state, &config.spotify).await {
        Ok(token) => token,
        Err(e) => error!("Spotify authentication failed: {}", e),
    };

    if let Err(e) = TokenManager::new(token).persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}

/// Builds a Spotify client from the cached token, refreshing it if needed,
/// and logs the authenticated user.
///
/// Exits the process when no usable token exists.
pub(crate) async fn authorized_client(config: &Config) -> SpotifyClient {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run spotsldl auth\n Error: {}",
            e
        ),
    };

    let token = match token_mgr.get_valid_token(&config.spotify).await {
        Ok(token) => token,
        Err(e) => error!(
            "Spotify authentication failed. Please run spotsldl auth\n Error: {}",
            e
        ),
    };

    let client = SpotifyClient::new(&config.spotify, token);
    match client.current_user().await {
        Ok(user) => stage!(
            Stage::Auth,
            "Authenticated as: {} ({})",
            user.display_name.as_deref().unwrap_or("-"),
            user.id
        ),
        Err(e) => error!("Spotify authentication failed: {}", e),
    }

    client
}

