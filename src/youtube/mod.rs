//! YouTube Data API adapter.
//!
//! Listening history comes from the account's system playlists. There is no
//! artist chart and no acoustic analysis.

pub mod client;
pub mod config;
pub mod models;
pub mod provider;

pub use client::YouTubeClient;
pub use config::YouTubeConfig;
pub use provider::YouTubeProvider;
