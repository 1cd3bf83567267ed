//! Request options and derived views for the recommendation system.

use crate::models::ListeningProfile;
use crate::playlist::Mood;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationOptions {
    /// Falls back to the engine's default limit
    pub limit: Option<usize>,
    /// Falls back to the engine's default level; clamped to `[0, 1]`
    pub exploration_level: Option<f64>,
    pub mood: Option<Mood>,
    pub genre: Option<String>,
}

impl RecommendationOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_exploration(mut self, level: f64) -> Self {
        self.exploration_level = Some(level);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaylistOptions {
    pub name: String,
    pub description: String,
    /// Falls back to the engine's default playlist length
    pub length: Option<usize>,
    pub exploration_level: Option<f64>,
    pub mood: Option<Mood>,
    pub genre: Option<String>,
}

impl Default for PlaylistOptions {
    fn default() -> Self {
        Self {
            name: "Daily Mix".to_string(),
            description: "Curated from your listening habits".to_string(),
            length: None,
            exploration_level: None,
            mood: None,
            genre: None,
        }
    }
}

impl PlaylistOptions {
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

/// Headline numbers about a listener's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningInsights {
    pub total_tracks: usize,
    pub most_played_artist: String,
    pub most_played_genre: String,
    /// Over recent tracks only
    pub total_play_time_seconds: u64,
    pub average_track_length_seconds: f64,
}

const UNKNOWN: &str = "Unknown";

impl From<&ListeningProfile> for ListeningInsights {
    fn from(profile: &ListeningProfile) -> Self {
        let total_play_time_seconds: u64 = profile
            .recent_tracks
            .iter()
            .map(|t| u64::from(t.duration_seconds.unwrap_or(0)))
            .sum();
        let average_track_length_seconds = if profile.recent_tracks.is_empty() {
            0.0
        } else {
            total_play_time_seconds as f64 / profile.recent_tracks.len() as f64
        };

        Self {
            total_tracks: profile.total_tracks(),
            most_played_artist: profile
                .top_artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            most_played_genre: profile
                .top_genres
                .first()
                .map(|g| g.name.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            total_play_time_seconds,
            average_track_length_seconds,
        }
    }
}
