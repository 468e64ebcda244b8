use std::{sync::Arc, time::Duration};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config::SpotifyConfig,
    server::start_api_server,
    types::{PkceToken, Token},
    info, utils, warning,
};

/// Maximum time to wait for the browser to hit the callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE authorization code flow against Spotify.
///
/// 1. Generates a code verifier and its S256 challenge
/// 2. Starts the local callback server on the configured address
/// 3. Opens the authorization URL in the default browser
/// 4. Waits for the callback handler to exchange the code for a token
///
/// Returns the obtained token. Persisting it is left to the caller.
///
/// # Errors
///
/// Returns a message when no token arrived within 60 seconds.
pub async fn auth(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    spotify: &SpotifyConfig,
) -> Result<Token, String> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    let server_config = spotify.clone();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, server_config).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = authorization_url(spotify, &code_challenge);

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    info!("Opening the Spotify authorization page in your browser...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(shared_state)
        .await
        .ok_or_else(|| "Authentication failed or timed out.".to_string())
}

/// Builds the Spotify authorize URL for the PKCE flow.
pub fn authorization_url(spotify: &SpotifyConfig, code_challenge: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        auth_url = spotify.auth_url,
        client_id = spotify.client_id,
        redirect_uri = spotify.redirect_uri,
        code_challenge = code_challenge,
        scope = spotify.scope.replace(' ', "%20")
    )
}

/// Polls the shared state until the callback handler stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for Spotify authorization...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
            pb.finish_and_clear();
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}

/// Exchanges an authorization code for an access token using PKCE.
pub async fn exchange_code_pkce(
    spotify: &SpotifyConfig,
    code: &str,
    verifier: &str,
) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(&spotify.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", spotify.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", spotify.redirect_uri.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;
    token_from_json(&json)
}

/// Reads a token endpoint response.
///
/// `access_token` is mandatory. A missing `refresh_token` is kept empty so the
/// caller can carry the previous one over, `expires_in` defaults to one hour.
pub fn token_from_json(json: &Value) -> Result<Token, String> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| match json["error"].as_str() {
            Some(err) => format!("token endpoint returned error: {}", err),
            None => "token endpoint response has no access_token".to_string(),
        })?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
