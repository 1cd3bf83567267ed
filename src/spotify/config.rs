use crate::providers::TimeWindow;
use serde::{Deserialize, Serialize};

pub const API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
/// Largest id batch `/audio-features` accepts
pub const AUDIO_FEATURES_BATCH: usize = 100;
/// Largest `limit` the Web API accepts on paged endpoints
pub const MAX_PAGE_LIMIT: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// OAuth bearer token, already obtained by the caller
    pub access_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

impl SpotifyConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: default_base_url(),
        }
    }
}

/// Value of the `time_range` parameter for `/me/top/*`.
pub fn time_range(window: TimeWindow) -> &'static str {
    match window {
        TimeWindow::Short => "short_term",
        TimeWindow::Medium => "medium_term",
        TimeWindow::Long => "long_term",
    }
}

/// Clamp a requested page size into what the API accepts.
pub fn page_limit(limit: usize) -> String {
    limit.clamp(1, MAX_PAGE_LIMIT).to_string()
}
