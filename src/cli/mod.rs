//! # CLI Module
//!
//! User-facing commands. Each command receives the explicit [`crate::config::Config`]
//! built in `main` and delegates to the Spotify, MusicBrainz and pipeline
//! modules.
//!
//! - [`auth`] - Spotify OAuth 2.0 PKCE authorization, stores the token
//! - [`export`] - Full run: collect, filter, resolve, write the album queue
//! - [`list_artists`] - Collection only, prints the unique artists
//!
//! ## Error Handling
//!
//! Commands terminate with exit code 1 through the `error!` macro on fatal
//! conditions (no token, failed authentication, failed playlist walk). Per
//! artist lookup problems are logged and the run goes on.
//!
//! ## Usage
//!
//! ```bash
//! spotsldl auth                 # Authorize once
//! spotsldl artists              # Preview the collected artists
//! spotsldl export               # Build sldl-albums.txt
//! spotsldl export --escape      # Same, with `\`, `"` and `,` escaped in names
//! ```

mod artists;
mod auth;
mod export;

pub use artists::list_artists;
pub use auth::auth;
pub use export::export;
