use serde::{Deserialize, Serialize};

pub const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
/// Largest `maxResults` the Data API accepts
pub const MAX_PAGE_LIMIT: usize = 50;
/// `videoCategoryId` of the Music category
pub const MUSIC_CATEGORY_ID: &str = "10";

/// Titles of the per-account system playlists.
pub const WATCH_HISTORY_PLAYLIST: &str = "Watch history";
pub const LIKED_VIDEOS_PLAYLIST: &str = "Liked videos";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// OAuth bearer token, already obtained by the caller
    pub access_token: String,
    /// Optional project key, sent as `key` when present
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

impl YouTubeConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

/// Clamp a requested page size into what the API accepts.
pub fn page_limit(limit: usize) -> String {
    limit.clamp(1, MAX_PAGE_LIMIT).to_string()
}
