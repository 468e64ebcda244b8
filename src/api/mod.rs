//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that runs during
//! `spotsldl auth`.
//!
//! - [`callback`] - Receives the authorization code from Spotify's redirect and
//!   exchanges it, together with the PKCE verifier, for an access token.
//! - [`health`] - Reports name and version, handy to check that the redirect URI
//!   points at the right address before authorizing.
//!
//! Both handlers are plain async functions wired into an Axum router by
//! [`crate::server::start_api_server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
