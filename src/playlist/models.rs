use crate::models::Track;
use crate::providers::ProviderId;
use crate::recommendations::errors::RecommendationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Calm,
    Melancholic,
    Intense,
    Neutral,
}

impl Mood {
    /// Classify a (valence, energy) point. Only five of the moods are
    /// reachable this way; `Sad` and `Energetic` exist as request options.
    pub fn from_valence_energy(valence: f64, energy: f64) -> Self {
        if valence > 0.6 && energy > 0.6 {
            Mood::Happy
        } else if valence > 0.6 && energy < 0.4 {
            Mood::Calm
        } else if valence < 0.4 && energy > 0.6 {
            Mood::Intense
        } else if valence < 0.4 && energy < 0.4 {
            Mood::Melancholic
        } else {
            Mood::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Calm => "calm",
            Mood::Melancholic => "melancholic",
            Mood::Intense => "intense",
            Mood::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = RecommendationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "energetic" => Ok(Mood::Energetic),
            "calm" => Ok(Mood::Calm),
            "melancholic" => Ok(Mood::Melancholic),
            "intense" => Ok(Mood::Intense),
            "neutral" => Ok(Mood::Neutral),
            _ => Err(RecommendationError::InvalidOption(format!(
                "Invalid mood: '{}'. Valid: happy, sad, energetic, calm, melancholic, intense, neutral",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMetadata {
    pub total_duration_seconds: u64,
    pub average_tempo: f64,
    /// Pitch class; absent when no track carries a key
    pub dominant_key: Option<u8>,
    pub energy_level: f64,
    pub mood: Mood,
    pub source_providers: Vec<ProviderId>,
}

/// A track at its final 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub position: usize,
    #[serde(flatten)]
    pub track: Track,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub generated_at: DateTime<Utc>,
    pub tracks: Vec<PlaylistTrack>,
    pub metadata: PlaylistMetadata,
}

impl Playlist {
    /// Number `ordered` from 1 in its given order.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        ordered: Vec<Track>,
        metadata: PlaylistMetadata,
    ) -> Self {
        let tracks = ordered
            .into_iter()
            .enumerate()
            .map(|(index, track)| PlaylistTrack {
                position: index + 1,
                track,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            generated_at: Utc::now(),
            tracks,
            metadata,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_quadrants() {
        assert_eq!(Mood::from_valence_energy(0.8, 0.8), Mood::Happy);
        assert_eq!(Mood::from_valence_energy(0.8, 0.2), Mood::Calm);
        assert_eq!(Mood::from_valence_energy(0.2, 0.8), Mood::Intense);
        assert_eq!(Mood::from_valence_energy(0.2, 0.2), Mood::Melancholic);
        assert_eq!(Mood::from_valence_energy(0.5, 0.9), Mood::Neutral);
        assert_eq!(Mood::from_valence_energy(0.6, 0.6), Mood::Neutral);
    }

    #[test]
    fn test_mood_parsing() {
        assert_eq!(" Energetic ".parse::<Mood>(), Ok(Mood::Energetic));
        assert!(matches!(
            "grumpy".parse::<Mood>(),
            Err(RecommendationError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_positions_follow_final_order() {
        let tracks = vec![
            Track::new("a", "x", ProviderId::Spotify, "1"),
            Track::new("b", "y", ProviderId::Spotify, "2"),
            Track::new("c", "z", ProviderId::Spotify, "3"),
        ];
        let metadata = PlaylistMetadata {
            total_duration_seconds: 0,
            average_tempo: 0.0,
            dominant_key: None,
            energy_level: 0.0,
            mood: Mood::Neutral,
            source_providers: vec![ProviderId::Spotify],
        };

        let playlist = Playlist::new("Mix", "", tracks, metadata);
        let positions: Vec<usize> = playlist.tracks.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(playlist.tracks[2].track.name, "c");
    }
}
