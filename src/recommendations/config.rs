use crate::providers::TimeWindow;
use crate::recommendations::errors::RecommendationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const CALL_TIMEOUT_SECONDS: u64 = 10;
pub const HISTORY_LIMIT: usize = 50;
pub const SEED_TRACK_COUNT: usize = 5;
pub const SEED_ARTIST_COUNT: usize = 3;
pub const SIMILAR_PER_SEED: usize = 10;
pub const DEFAULT_EXPLORATION_LEVEL: f64 = 0.5;
pub const DISCOVERY_EXPLORATION_LEVEL: f64 = 0.8;
pub const DEFAULT_PLAYLIST_LENGTH: usize = 30;
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 20;
pub const SIMILAR_TRACKS_LIMIT: usize = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per provider call; an expired call counts as a failure for that call only
    pub call_timeout_secs: u64,
    /// Limit passed to recent/top history fetches
    pub history_limit: usize,
    pub top_window: TimeWindow,
    pub seed_track_count: usize,
    pub seed_artist_count: usize,
    pub similar_per_seed: usize,
    pub default_exploration_level: f64,
    pub discovery_exploration_level: f64,
    pub default_playlist_length: usize,
    pub default_recommendation_limit: usize,
    pub similar_tracks_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: CALL_TIMEOUT_SECONDS,
            history_limit: HISTORY_LIMIT,
            top_window: TimeWindow::Medium,
            seed_track_count: SEED_TRACK_COUNT,
            seed_artist_count: SEED_ARTIST_COUNT,
            similar_per_seed: SIMILAR_PER_SEED,
            default_exploration_level: DEFAULT_EXPLORATION_LEVEL,
            discovery_exploration_level: DISCOVERY_EXPLORATION_LEVEL,
            default_playlist_length: DEFAULT_PLAYLIST_LENGTH,
            default_recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            similar_tracks_limit: SIMILAR_TRACKS_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Read from a JSON object; missing keys keep their defaults.
    pub fn from_json(config: Value) -> Result<Self, RecommendationError> {
        Ok(serde_json::from_value(config)?)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}
