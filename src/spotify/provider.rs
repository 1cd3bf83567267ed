use async_trait::async_trait;
use anyhow::{anyhow, Result};
use serde_json::Value;

use super::client::SpotifyClient;
use super::config::*;
use super::models::{self, *};
use crate::models::{Artist, AudioFeatures, Track};
use crate::providers::{ProviderAdapter, ProviderId, TimeWindow};

pub struct SpotifyProvider {
    client: SpotifyClient,
}

impl SpotifyProvider {
    pub fn new(config: SpotifyConfig) -> Result<Self> {
        Ok(Self {
            client: SpotifyClient::new(config)?,
        })
    }

    /// Build from a JSON object carrying `access_token`.
    pub fn from_json(config: Value) -> Result<Self> {
        let config: SpotifyConfig = serde_json::from_value(config)
            .map_err(|e| anyhow!("Invalid Spotify config: {}", e))?;
        if config.access_token.trim().is_empty() {
            return Err(anyhow!("Missing access_token"));
        }
        Self::new(config)
    }

    async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        let limit = page_limit(limit);
        let resp: TrackSearchResponse = self
            .client
            .get(
                "/search",
                &[("q", query), ("type", "track"), ("limit", limit.as_str())],
            )
            .await?;
        Ok(models::tracks(resp.tracks.items))
    }
}

/// Field-filtered query that pins a search to one track by one artist.
fn track_query(artist: &str, track: &str) -> String {
    format!("track:{} artist:{}", track, artist)
}

#[async_trait]
impl ProviderAdapter for SpotifyProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Spotify
    }

    fn name(&self) -> &str {
        "Spotify"
    }

    async fn fetch_recent_tracks(&self, limit: usize) -> Result<Vec<Track>> {
        let limit = page_limit(limit);
        let resp: Paging<PlayHistory> = self
            .client
            .get("/me/player/recently-played", &[("limit", limit.as_str())])
            .await?;
        Ok(models::tracks(resp.items.into_iter().map(|h| h.track).collect()))
    }

    async fn fetch_top_tracks(&self, window: TimeWindow, limit: usize) -> Result<Vec<Track>> {
        let limit = page_limit(limit);
        let resp: Paging<SpotifyTrack> = self
            .client
            .get(
                "/me/top/tracks",
                &[("time_range", time_range(window)), ("limit", limit.as_str())],
            )
            .await?;
        Ok(models::tracks(resp.items))
    }

    async fn fetch_top_artists(&self, window: TimeWindow, limit: usize) -> Result<Vec<Artist>> {
        let limit = page_limit(limit);
        let resp: Paging<SpotifyArtist> = self
            .client
            .get(
                "/me/top/artists",
                &[("time_range", time_range(window)), ("limit", limit.as_str())],
            )
            .await?;
        Ok(resp.items.into_iter().map(SpotifyArtist::into_artist).collect())
    }

    /// Resolves the seed through search, then asks `/recommendations`.
    async fn fetch_similar_tracks(
        &self,
        artist: &str,
        track: &str,
        limit: usize,
    ) -> Result<Vec<Track>> {
        let Some(seed) = self
            .search_tracks(&track_query(artist, track), 1)
            .await?
            .into_iter()
            .next()
        else {
            log::debug!("Spotify has no match for '{}' by {}", track, artist);
            return Ok(Vec::new());
        };

        let limit = limit.clamp(1, 100).to_string();
        let resp: RecommendationsResponse = self
            .client
            .get(
                "/recommendations",
                &[
                    ("seed_tracks", seed.source_track_id.as_str()),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;
        Ok(models::tracks(resp.tracks))
    }

    async fn fetch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>> {
        let mut features = Vec::with_capacity(track_ids.len());

        for batch in track_ids.chunks(AUDIO_FEATURES_BATCH) {
            let ids = batch.join(",");
            let resp: AudioFeaturesResponse = self
                .client
                .get("/audio-features", &[("ids", ids.as_str())])
                .await?;

            let mut found: Vec<Option<AudioFeatures>> = resp
                .audio_features
                .into_iter()
                .map(|f| f.map(AudioFeatures::from))
                .collect();
            // Keep alignment with the requested ids even on a short reply
            found.resize(batch.len(), None);
            features.extend(found);
        }

        Ok(features)
    }

    fn supports_audio_features(&self) -> bool {
        true
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        self.search_tracks(query, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_requires_token() {
        assert!(SpotifyProvider::from_json(json!({ "access_token": " " })).is_err());
        assert!(SpotifyProvider::from_json(json!({})).is_err());

        let provider = SpotifyProvider::from_json(json!({ "access_token": "abc" })).unwrap();
        assert_eq!(provider.client.config().base_url, API_BASE_URL);
        assert_eq!(provider.id(), ProviderId::Spotify);
        assert!(provider.supports_audio_features());
    }

    #[test]
    fn test_request_parameters() {
        assert_eq!(time_range(TimeWindow::Short), "short_term");
        assert_eq!(time_range(TimeWindow::Long), "long_term");
        assert_eq!(page_limit(500), "50");
        assert_eq!(page_limit(0), "1");
        assert_eq!(track_query("Low", "Words"), "track:Words artist:Low");
    }
}
