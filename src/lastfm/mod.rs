//! Last.fm scrobble history and similarity data.
//!
//! Last.fm has no acoustic analysis, so tracks from here never carry
//! audio features.

pub mod config;
pub mod models;
pub mod provider;

pub use config::LastFmConfig;
pub use provider::LastFmProvider;
