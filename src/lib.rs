//! Recommendation aggregation and playlist sequencing.
//!
//! Listening history and similarity data come from any number of provider
//! adapters, are merged and deduplicated, blended by exploration level and,
//! for playlists, ordered for harmonic and tempo continuity.

pub mod errors;
pub mod lastfm;
pub mod models;
pub mod playlist;
pub mod providers;
pub mod recommendations;
pub mod spotify;
pub mod youtube;

pub use errors::ProviderError;
pub use models::{Artist, AudioFeatures, GenreCount, ListeningProfile, Track};
pub use playlist::{Mood, Playlist, PlaylistMetadata, PlaylistTrack};
pub use providers::{ProviderAdapter, ProviderId, ProviderRegistry, TimeWindow};
pub use recommendations::{
    EngineConfig, ListeningInsights, PlaylistOptions, RecommendationEngine, RecommendationError,
    RecommendationOptions,
};
