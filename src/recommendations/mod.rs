//! Recommendation engine for music discovery.
//!
//! Merges listening history and similarity data from every connected
//! provider, then blends familiar and novel candidates into
//! recommendation lists and sequenced playlists.

pub mod config;
pub mod dedup;
pub mod engine;
pub mod errors;
pub mod exploration;
pub mod filters;
pub mod genres;
pub mod types;

pub use config::EngineConfig;
pub use dedup::{dedupe_artists, dedupe_tracks};
pub use engine::RecommendationEngine;
pub use errors::RecommendationError;
pub use exploration::{filter_by_exploration, ExplorationLevel};
pub use filters::{GenreFilter, MoodFilter, PassThrough};
pub use genres::analyze_genres;
pub use types::{ListeningInsights, PlaylistOptions, RecommendationOptions};
