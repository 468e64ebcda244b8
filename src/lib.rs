//! Spotify to slsk-batchdl Album Queue Library
//!
//! This library turns the artists found across a user's Spotify playlists into
//! a queue of studio albums for the slsk-batchdl download tool. It collects the
//! unique artists of every playlist, lets the user pick the ones to keep,
//! resolves each accepted artist against MusicBrainz and writes one query line
//! per studio album.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Explicit runtime configuration built from the environment
//! - `management` - Token cache management
//! - `musicbrainz` - Rate limited MusicBrainz catalog client
//! - `pipeline` - Artist collection, filtering, resolution and output writing
//! - `prompt` - Single keystroke yes/no terminal prompt
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod musicbrainz;
pub mod pipeline;
pub mod prompt;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object so that module specific errors
/// (`ConfigError`, `SourceError`, `CatalogError`, ...) can be propagated with `?`
/// while keeping the Send + Sync bounds needed in async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1. Only the binary layer uses this,
/// for missing configuration and failed authentication. Library code returns
/// errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a log line tagged with a pipeline stage.
///
/// The first argument is a [`types::Stage`], the rest is forwarded to
/// `format_args!`. The tag is colored by the severity of the stage.
///
/// # Example
///
/// ```
/// stage!(Stage::Mbid, "Looking up MBID for: {}", artist);
/// // [MBID] Looking up MBID for: Radiohead
/// ```
#[macro_export]
macro_rules! stage {
  ($stage:expr, $($arg:tt)*) => ({
    let stage: $crate::types::Stage = $stage;
    println!("[{}] {}", stage.painted(), std::format_args!($($arg)*));
  })
}
