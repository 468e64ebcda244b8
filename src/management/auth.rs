use std::{fmt, io::Error, path::PathBuf};

use chrono::Utc;
use reqwest::Client;

use crate::{config::SpotifyConfig, spotify::auth::token_from_json, types::Token};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_BUFFER_SECS: u64 = 240;

#[derive(Debug)]
pub enum TokenError {
    IoError(Error),
    SerdeError(serde_json::Error),
    RefreshError(String),
}

impl From<Error> for TokenError {
    fn from(err: Error) -> Self {
        TokenError::IoError(err)
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        TokenError::SerdeError(err)
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::IoError(e) => write!(f, "cannot access token cache: {}", e),
            TokenError::SerdeError(e) => write!(f, "token cache is corrupt: {}", e),
            TokenError::RefreshError(e) => write!(f, "cannot refresh token: {}", e),
        }
    }
}

impl std::error::Error for TokenError {}

pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Self::token_path(),
        }
    }

    /// Uses `path` instead of the per-user cache location.
    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self, TokenError> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, TokenError> {
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token that is valid for at least the expiry buffer,
    /// refreshing and persisting it first when needed.
    pub async fn get_valid_token(&mut self, spotify: &SpotifyConfig) -> Result<String, TokenError> {
        if self.is_expired() {
            self.token = self.refresh_token(spotify).await?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_BUFFER_SECS >= self.token.obtained_at + self.token.expires_in
    }

    async fn refresh_token(&self, spotify: &SpotifyConfig) -> Result<Token, TokenError> {
        let client = Client::new();
        let res = client
            .post(&spotify.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.token.refresh_token.as_str()),
                ("client_id", spotify.client_id.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TokenError::RefreshError(e.to_string()))?;

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| TokenError::RefreshError(e.to_string()))?;

        let mut token = token_from_json(&json).map_err(TokenError::RefreshError)?;
        // Spotify may omit the refresh token when it does not rotate it.
        if token.refresh_token.is_empty() {
            token.refresh_token = self.token.refresh_token.clone();
        }
        Ok(token)
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spotsldl/cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
