use crate::models::{Artist, Track};
use crate::providers::ProviderId;
use serde::{Deserialize, Deserializer};

/// Last.fm collapses a one-element list into a bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Numbers arrive as JSON numbers or as strings depending on the method.
fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) => Some(n),
        Some(Loose::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextField {
    #[serde(rename = "#text", default)]
    pub text: String,
}

impl TextField {
    fn non_empty(&self) -> Option<String> {
        let text = self.text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// `{"name": ..}` on most methods, `{"#text": ..}` on recent tracks, or a
/// bare string in search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ArtistField {
    Plain(String),
    Named {
        #[serde(alias = "#text")]
        name: String,
    },
}

impl Default for ArtistField {
    fn default() -> Self {
        ArtistField::Plain(String::new())
    }
}

impl ArtistField {
    pub fn name(&self) -> &str {
        match self {
            ArtistField::Plain(name) => name,
            ArtistField::Named { name } => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmTrack {
    pub name: String,
    #[serde(default)]
    pub artist: ArtistField,
    #[serde(default)]
    pub album: Option<TextField>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub duration: Option<f64>,
    #[serde(rename = "match", default, deserialize_with = "loose_number")]
    pub match_score: Option<f64>,
}

impl LastFmTrack {
    pub fn into_track(self) -> Track {
        let artist = self.artist.name().to_string();
        let source_track_id = format!("{} - {}", artist, self.name);
        Track {
            album: self.album.as_ref().and_then(TextField::non_empty),
            duration_seconds: self
                .duration
                .filter(|d| *d > 0.0)
                .map(|d| d.round() as u32),
            url: self.url.filter(|u| !u.is_empty()),
            match_score: self
                .match_score
                .filter(|m| m.is_finite())
                .map(|m| m.clamp(0.0, 1.0)),
            ..Track::new(self.name, artist, ProviderId::LastFm, source_track_id)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmArtist {
    pub name: String,
    #[serde(default, deserialize_with = "loose_number")]
    pub playcount: Option<f64>,
}

impl LastFmArtist {
    pub fn into_artist(self) -> Artist {
        Artist {
            play_count: self.playcount.map(|p| p as u64),
            ..Artist::new(self.name, ProviderId::LastFm)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackList {
    #[serde(default)]
    pub track: OneOrMany<LastFmTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistList {
    #[serde(default)]
    pub artist: OneOrMany<LastFmArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracksResponse {
    #[serde(default)]
    pub recenttracks: TrackList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub toptracks: TrackList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopArtistsResponse {
    #[serde(default)]
    pub topartists: ArtistList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarTracksResponse {
    #[serde(default)]
    pub similartracks: TrackList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub trackmatches: TrackList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: SearchResults,
}

/// Error body; Last.fm sometimes sends it with a 200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: u16,
    #[serde(default)]
    pub message: String,
}

pub fn tracks(list: TrackList) -> Vec<Track> {
    list.track
        .into_vec()
        .into_iter()
        .map(LastFmTrack::into_track)
        .collect()
}

pub fn artists(list: ArtistList) -> Vec<Artist> {
    list.artist
        .into_vec()
        .into_iter()
        .map(LastFmArtist::into_artist)
        .collect()
}
