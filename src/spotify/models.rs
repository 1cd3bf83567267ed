use crate::models::{Artist, AudioFeatures, Track};
use crate::providers::ProviderId;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleAlbum {
    pub name: String,
}

/// Track object as returned by every track-bearing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    /// Null for local files
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<SimpleAlbum>,
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl SpotifyTrack {
    /// `None` for tracks that cannot be addressed again (no id or no artist).
    pub fn into_track(self) -> Option<Track> {
        let id = self.id?;
        let artist = self.artists.into_iter().next()?.name;
        let mut track = Track::new(self.name, artist, ProviderId::Spotify, id);
        track.album = self.album.map(|a| a.name).filter(|n| !n.is_empty());
        track.duration_seconds = self
            .duration_ms
            .map(|ms| ((ms + 500) / 1000) as u32)
            .filter(|s| *s > 0);
        track.url = self.external_urls.spotify;
        Some(track)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl SpotifyArtist {
    pub fn into_artist(self) -> Artist {
        Artist {
            name: self.name,
            genres: self.genres,
            play_count: None,
            source: ProviderId::Spotify,
            source_artist_id: self.id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayHistory {
    pub track: SpotifyTrack,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackSearchResponse {
    pub tracks: Paging<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyAudioFeatures {
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub valence: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    pub speechiness: Option<f64>,
    /// -1 when no key was detected
    pub key: Option<i32>,
    pub mode: Option<i32>,
    pub tempo: Option<f64>,
    pub time_signature: Option<i32>,
}

impl From<SpotifyAudioFeatures> for AudioFeatures {
    fn from(f: SpotifyAudioFeatures) -> Self {
        AudioFeatures {
            danceability: f.danceability,
            energy: f.energy,
            valence: f.valence,
            acousticness: f.acousticness,
            instrumentalness: f.instrumentalness,
            liveness: f.liveness,
            speechiness: f.speechiness,
            key: f.key.and_then(|k| u8::try_from(k).ok()).filter(|k| *k < 12),
            mode: f.mode.and_then(|m| u8::try_from(m).ok()).filter(|m| *m <= 1),
            tempo: f.tempo.filter(|t| *t > 0.0),
            time_signature: f.time_signature.and_then(|t| u8::try_from(t).ok()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    /// Aligned with the requested ids; unknown ids come back as null
    #[serde(default)]
    pub audio_features: Vec<Option<SpotifyAudioFeatures>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

pub fn tracks(items: Vec<SpotifyTrack>) -> Vec<Track> {
    items.into_iter().filter_map(SpotifyTrack::into_track).collect()
}
