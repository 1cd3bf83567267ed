//! Spotify Web API adapter.
//!
//! The only provider with acoustic analysis, so playlist sequencing leans
//! on tracks sourced from here.

pub mod client;
pub mod config;
pub mod models;
pub mod provider;

pub use client::SpotifyClient;
pub use config::SpotifyConfig;
pub use provider::SpotifyProvider;
