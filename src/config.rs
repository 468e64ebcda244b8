//! Configuration management for the album queue exporter.
//!
//! Values are read once from environment variables and a `.env` file into an
//! explicit [`Config`] that is handed to every component at construction time.
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, time::Duration};

use dotenv;

pub const DEFAULT_SPOTIFY_SCOPE: &str = "playlist-read-private";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_MUSICBRAINZ_API_URL: &str = "https://musicbrainz.org/ws/2";
pub const DEFAULT_RATE_LIMIT_MS: u64 = 1000;
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "sldl-albums.txt";

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Spotify OAuth and Web API settings.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
}

/// MusicBrainz web service settings.
#[derive(Debug, Clone)]
pub struct MusicBrainzConfig {
    pub api_url: String,
    pub contact_email: String,
    pub min_interval: Duration,
}

impl MusicBrainzConfig {
    /// User-Agent the MusicBrainz usage policy asks for: application, version
    /// and a way to reach the operator.
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.contact_email
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify: SpotifyConfig,
    pub musicbrainz: MusicBrainzConfig,
    pub working_path: PathBuf,
    pub output_file_name: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let rate_limit_ms = match get("MUSICBRAINZ_RATE_LIMIT_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    key: "MUSICBRAINZ_RATE_LIMIT_MS",
                    value,
                })?,
            None => DEFAULT_RATE_LIMIT_MS,
        };

        Ok(Config {
            spotify: SpotifyConfig {
                client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
                redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
                scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE),
                auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
                token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
                api_url: or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
                server_addr: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            },
            musicbrainz: MusicBrainzConfig {
                api_url: or_default("MUSICBRAINZ_API_URL", DEFAULT_MUSICBRAINZ_API_URL),
                contact_email: required("CONTACT_EMAIL")?,
                min_interval: Duration::from_millis(rate_limit_ms),
            },
            working_path: PathBuf::from(required("WORKING_PATH")?),
            output_file_name: or_default("OUTPUT_FILE_NAME", DEFAULT_OUTPUT_FILE_NAME),
        })
    }

    /// Path of the album queue file inside the working directory.
    pub fn output_path(&self) -> PathBuf {
        self.working_path.join(&self.output_file_name)
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Looks for the file in:
/// - Linux: `~/.local/share/spotsldl/.env`
/// - macOS: `~/Library/Application Support/spotsldl/.env`
/// - Windows: `%LOCALAPPDATA%/spotsldl/.env`
///
/// A missing file is not an error, variables may come from the environment
/// alone. A file that exists but cannot be parsed is.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotsldl/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}
