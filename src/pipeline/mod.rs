//! # Export Pipeline
//!
//! Turns the artists of a user's playlists into slsk-batchdl queue entries.
//!
//! ```text
//! INIT → AUTH_READY → ARTISTS_COLLECTED → ARTISTS_FILTERED
//!                                              ↓
//!                          ┌──────── RESOLVING ⇄ WRITING ────────┐
//!                          └────────────────→ DONE ←─────────────┘
//! ```
//!
//! - [`collector`] - Walks the paginated playlist source into a sorted,
//!   de-duplicated artist list
//! - [`filter`] - Asks the user about every artist
//! - [`resolver`] - Finds the MBID and the studio albums of one artist
//! - [`writer`] - Appends and flushes one queue line per album
//! - [`driver`] - Runs the steps above in order, strictly sequentially
//!
//! A run cannot be resumed. A run that fails half way has to start over from
//! collection; entries written before the failure stay in the output file.

pub mod collector;
pub mod driver;
pub mod filter;
pub mod resolver;
pub mod writer;

pub use collector::collect_artists;
pub use driver::{Pipeline, PipelineState, RunSummary};
pub use filter::filter_artists;
pub use resolver::{MetadataResolver, Resolved, SKIP_KEYWORDS, is_studio_title};
pub use writer::{Escaping, OutputWriter, format_entry};
