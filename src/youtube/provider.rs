use async_trait::async_trait;
use anyhow::{anyhow, Result};
use serde_json::Value;

use super::client::YouTubeClient;
use super::config::*;
use super::models::*;
use crate::models::{Artist, Track};
use crate::providers::{ProviderAdapter, ProviderId, TimeWindow};

pub struct YouTubeProvider {
    client: YouTubeClient,
}

impl YouTubeProvider {
    pub fn new(config: YouTubeConfig) -> Result<Self> {
        Ok(Self {
            client: YouTubeClient::new(config)?,
        })
    }

    /// Build from a JSON object carrying `access_token` and optionally `api_key`.
    pub fn from_json(config: Value) -> Result<Self> {
        let config: YouTubeConfig = serde_json::from_value(config)
            .map_err(|e| anyhow!("Invalid YouTube config: {}", e))?;
        if config.access_token.trim().is_empty() {
            return Err(anyhow!("Missing access_token"));
        }
        Self::new(config)
    }

    /// Items of one of the account's own playlists, looked up by title.
    async fn playlist_tracks(&self, title: &str, limit: usize) -> Result<Vec<Track>> {
        let playlists: PlaylistListResponse = self
            .client
            .get(
                "/playlists",
                &[("part", "snippet"), ("mine", "true"), ("maxResults", "50")],
            )
            .await?;

        let playlist_id = playlists
            .find_id(title)
            .ok_or_else(|| anyhow!("YouTube playlist '{}' not found", title))?
            .to_string();

        let limit = page_limit(limit);
        let items: PlaylistItemListResponse = self
            .client
            .get(
                "/playlistItems",
                &[
                    ("part", "snippet"),
                    ("playlistId", playlist_id.as_str()),
                    ("maxResults", limit.as_str()),
                ],
            )
            .await?;
        Ok(items.tracks())
    }

    /// Music-category video search. `extra` narrows it further.
    async fn search_videos(&self, extra: (&str, &str), limit: usize) -> Result<Vec<Track>> {
        let limit = page_limit(limit);
        let resp: SearchListResponse = self
            .client
            .get(
                "/search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("videoCategoryId", MUSIC_CATEGORY_ID),
                    ("maxResults", limit.as_str()),
                    extra,
                ],
            )
            .await?;
        Ok(resp.tracks())
    }
}

fn seed_query(artist: &str, track: &str) -> String {
    format!("{} {}", artist, track)
}

#[async_trait]
impl ProviderAdapter for YouTubeProvider {
    fn id(&self) -> ProviderId {
        ProviderId::YouTube
    }

    fn name(&self) -> &str {
        "YouTube"
    }

    async fn fetch_recent_tracks(&self, limit: usize) -> Result<Vec<Track>> {
        self.playlist_tracks(WATCH_HISTORY_PLAYLIST, limit).await
    }

    /// Liked videos stand in for a top chart; the window is ignored.
    async fn fetch_top_tracks(&self, _window: TimeWindow, limit: usize) -> Result<Vec<Track>> {
        self.playlist_tracks(LIKED_VIDEOS_PLAYLIST, limit).await
    }

    async fn fetch_top_artists(&self, _window: TimeWindow, _limit: usize) -> Result<Vec<Artist>> {
        Ok(Vec::new())
    }

    /// Resolves the seed through search, then asks for related videos.
    async fn fetch_similar_tracks(
        &self,
        artist: &str,
        track: &str,
        limit: usize,
    ) -> Result<Vec<Track>> {
        let query = seed_query(artist, track);
        let Some(seed) = self
            .search_videos(("q", query.as_str()), 1)
            .await?
            .into_iter()
            .next()
        else {
            log::debug!("YouTube has no match for '{}' by {}", track, artist);
            return Ok(Vec::new());
        };

        let related = self
            .search_videos(("relatedToVideoId", seed.source_track_id.as_str()), limit)
            .await?;
        log::debug!("YouTube found {} videos related to '{}'", related.len(), track);
        Ok(related)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        self.search_videos(("q", query), limit).await
    }
}
