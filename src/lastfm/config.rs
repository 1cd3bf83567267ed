use crate::providers::TimeWindow;
use serde::{Deserialize, Serialize};

pub const API_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
pub const USER_AGENT: &str = concat!("mixweave/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LastFmConfig {
    pub api_key: String,
    pub username: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

impl LastFmConfig {
    pub fn new(api_key: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            username: username.into(),
            base_url: default_base_url(),
        }
    }
}

/// Value of the `period` parameter for user charts.
pub fn period(window: TimeWindow) -> &'static str {
    match window {
        TimeWindow::Short => "1month",
        TimeWindow::Medium => "3month",
        TimeWindow::Long => "12month",
    }
}
