use crate::models::Track;
use crate::providers::ProviderId;
use serde::Deserialize;

/// Auto-generated YouTube Music artist channels carry this suffix.
const TOPIC_SUFFIX: &str = " - Topic";

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

fn channel_artist(channel: &str) -> String {
    channel
        .strip_suffix(TOPIC_SUFFIX)
        .unwrap_or(channel)
        .trim()
        .to_string()
}

fn video_track(title: String, channel: Option<String>, video_id: Option<String>) -> Option<Track> {
    let video_id = video_id.filter(|id| !id.is_empty())?;
    let artist = channel.map(|c| channel_artist(&c)).filter(|c| !c.is_empty())?;
    let mut track = Track::new(title, artist, ProviderId::YouTube, video_id);
    track.url = Some(watch_url(&track.source_track_id));
    Some(track)
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSnippet {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResource {
    pub id: String,
    pub snippet: PlaylistSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistResource>,
}

impl PlaylistListResponse {
    pub fn find_id(&self, title: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|p| p.snippet.title == title)
            .map(|p| p.id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub title: String,
    /// Absent for deleted and private videos
    pub video_owner_channel_title: Option<String>,
    #[serde(default)]
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

impl PlaylistItem {
    pub fn into_track(self) -> Option<Track> {
        let snippet = self.snippet;
        video_track(
            snippet.title,
            snippet.video_owner_channel_title,
            snippet.resource_id.video_id,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

impl PlaylistItemListResponse {
    pub fn tracks(self) -> Vec<Track> {
        self.items
            .into_iter()
            .filter_map(PlaylistItem::into_track)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    #[serde(default)]
    pub title: String,
    pub channel_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: SearchId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

impl SearchListResponse {
    pub fn tracks(self) -> Vec<Track> {
        self.items
            .into_iter()
            .filter_map(|r| video_track(r.snippet.title, r.snippet.channel_title, r.id.video_id))
            .collect()
    }
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
