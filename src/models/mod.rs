use crate::providers::ProviderId;
use serde::{Deserialize, Serialize};

/// Acoustic descriptors for a single track.
///
/// Every field is optional: providers without acoustic analysis leave the
/// whole struct absent, and partial analyses leave gaps. Consumers treat a
/// missing value as "no information".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFeatures {
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub valence: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    pub speechiness: Option<f64>,
    /// Pitch class, 0 = C through 11 = B
    pub key: Option<u8>,
    /// 1 = major, 0 = minor
    pub mode: Option<u8>,
    /// Beats per minute
    pub tempo: Option<f64>,
    pub time_signature: Option<u8>,
}

impl AudioFeatures {
    /// Build with only a key set; the rest stays absent.
    pub fn with_key(key: u8) -> Self {
        Self {
            key: Some(key),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration_seconds: Option<u32>,
    pub source: ProviderId,
    /// Provider-specific id. Not comparable across providers.
    pub source_track_id: String,
    pub url: Option<String>,
    /// Similarity to the listener's known taste, 0..1
    pub match_score: Option<f64>,
    pub audio_features: Option<AudioFeatures>,
}

impl Track {
    pub fn new(
        name: impl Into<String>,
        artist: impl Into<String>,
        source: ProviderId,
        source_track_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            album: None,
            duration_seconds: None,
            source,
            source_track_id: source_track_id.into(),
            url: None,
            match_score: None,
            audio_features: None,
        }
    }

    pub fn with_match_score(mut self, score: f64) -> Self {
        self.match_score = Some(score);
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    pub fn with_features(mut self, features: AudioFeatures) -> Self {
        self.audio_features = Some(features);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub play_count: Option<u64>,
    pub source: ProviderId,
    pub source_artist_id: String,
}

impl Artist {
    pub fn new(name: impl Into<String>, source: ProviderId) -> Self {
        let name = name.into();
        Self {
            source_artist_id: name.clone(),
            name,
            genres: Vec::new(),
            play_count: None,
            source,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }
}

/// A genre tag and how many artists carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub name: String,
    pub count: usize,
}

/// Listening history merged across every connected provider.
///
/// Each list is already deduplicated when produced by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningProfile {
    pub recent_tracks: Vec<Track>,
    pub top_tracks: Vec<Track>,
    pub top_artists: Vec<Artist>,
    pub top_genres: Vec<GenreCount>,
}

impl ListeningProfile {
    pub fn total_tracks(&self) -> usize {
        self.recent_tracks.len() + self.top_tracks.len()
    }

    /// Top tracks sourced from `provider`, falling back to its recent tracks.
    pub fn seed_tracks(&self, provider: ProviderId, count: usize) -> Vec<&Track> {
        let top: Vec<&Track> = self
            .top_tracks
            .iter()
            .filter(|t| t.source == provider)
            .take(count)
            .collect();
        if !top.is_empty() {
            return top;
        }
        self.recent_tracks
            .iter()
            .filter(|t| t.source == provider)
            .take(count)
            .collect()
    }

    pub fn seed_artists(&self, provider: ProviderId, count: usize) -> Vec<&Artist> {
        self.top_artists
            .iter()
            .filter(|a| a.source == provider)
            .take(count)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_tracks_fall_back_to_recent() {
        let profile = ListeningProfile {
            recent_tracks: vec![
                Track::new("Recent", "A", ProviderId::LastFm, "1"),
                Track::new("Other", "B", ProviderId::Spotify, "2"),
            ],
            top_tracks: vec![Track::new("Top", "C", ProviderId::Spotify, "3")],
            ..Default::default()
        };

        let lastfm = profile.seed_tracks(ProviderId::LastFm, 5);
        assert_eq!(lastfm.len(), 1);
        assert_eq!(lastfm[0].name, "Recent");

        let spotify = profile.seed_tracks(ProviderId::Spotify, 5);
        assert_eq!(spotify.len(), 1);
        assert_eq!(spotify[0].name, "Top");

        assert!(profile.seed_tracks(ProviderId::YouTube, 5).is_empty());
        assert_eq!(profile.total_tracks(), 3);
    }

    #[test]
    fn test_audio_features_deserialize_partial() {
        let features: AudioFeatures =
            serde_json::from_value(serde_json::json!({ "energy": 0.4, "key": 7 })).unwrap();
        assert_eq!(features.energy, Some(0.4));
        assert_eq!(features.key, Some(7));
        assert_eq!(features.tempo, None);
    }
}
