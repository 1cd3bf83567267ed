use async_trait::async_trait;
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::config::*;
use super::models::{self, *};
use crate::errors::ProviderError;
use crate::models::{Artist, Track};
use crate::providers::{ProviderAdapter, ProviderId, TimeWindow};

pub struct LastFmProvider {
    client: Client,
    config: LastFmConfig,
}

impl LastFmProvider {
    pub fn new(config: LastFmConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build from a JSON object carrying `api_key` and `username`.
    pub fn from_json(config: Value) -> Result<Self> {
        let config: LastFmConfig = serde_json::from_value(config)
            .map_err(|e| anyhow!("Invalid Last.fm config: {}", e))?;
        if config.api_key.trim().is_empty() {
            return Err(anyhow!("Missing api_key"));
        }
        if config.username.trim().is_empty() {
            return Err(anyhow!("Missing username"));
        }
        Ok(Self::new(config)?)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let mut query: Vec<(&str, &str)> = vec![
            ("method", method),
            ("api_key", self.config.api_key.as_str()),
            ("format", "json"),
        ];
        query.extend_from_slice(params);

        let url = reqwest::Url::parse_with_params(&self.config.base_url, &query)
            .map_err(|e| ProviderError::Network(format!("URL parse error: {}", e)))?;

        log::debug!("Last.fm request: {}", method);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_response(status, &body)
    }
}

/// Decode a Last.fm body, surfacing API errors even when sent with 200.
fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ProviderError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !(200..300).contains(&status) => {
            return Err(ProviderError::Api {
                status,
                message: body.chars().take(200).collect(),
            });
        }
        Err(e) => return Err(ProviderError::Parse(e.to_string())),
    };

    if let Ok(error) = serde_json::from_value::<ApiError>(value.clone()) {
        log::warn!("Last.fm error {} ({}): {}", error.error, status, error.message);
        return Err(ProviderError::Api {
            status,
            message: format!("Last.fm error {}: {}", error.error, error.message),
        });
    }

    if !(200..300).contains(&status) {
        return Err(ProviderError::Api {
            status,
            message: format!("HTTP {}", status),
        });
    }

    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl ProviderAdapter for LastFmProvider {
    fn id(&self) -> ProviderId {
        ProviderId::LastFm
    }

    fn name(&self) -> &str {
        "Last.fm"
    }

    async fn fetch_recent_tracks(&self, limit: usize) -> Result<Vec<Track>> {
        let limit_param = limit.to_string();
        let resp: RecentTracksResponse = self
            .call(
                "user.getrecenttracks",
                &[("user", self.config.username.as_str()), ("limit", limit_param.as_str())],
            )
            .await?;

        // The now-playing entry comes on top of `limit`
        let mut tracks = models::tracks(resp.recenttracks);
        tracks.truncate(limit);
        Ok(tracks)
    }

    async fn fetch_top_tracks(&self, window: TimeWindow, limit: usize) -> Result<Vec<Track>> {
        let limit_param = limit.to_string();
        let resp: TopTracksResponse = self
            .call(
                "user.gettoptracks",
                &[
                    ("user", self.config.username.as_str()),
                    ("period", period(window)),
                    ("limit", limit_param.as_str()),
                ],
            )
            .await?;
        Ok(models::tracks(resp.toptracks))
    }

    async fn fetch_top_artists(&self, window: TimeWindow, limit: usize) -> Result<Vec<Artist>> {
        let limit_param = limit.to_string();
        let resp: TopArtistsResponse = self
            .call(
                "user.gettopartists",
                &[
                    ("user", self.config.username.as_str()),
                    ("period", period(window)),
                    ("limit", limit_param.as_str()),
                ],
            )
            .await?;
        Ok(models::artists(resp.topartists))
    }

    async fn fetch_similar_tracks(
        &self,
        artist: &str,
        track: &str,
        limit: usize,
    ) -> Result<Vec<Track>> {
        let limit_param = limit.to_string();
        let resp: SimilarTracksResponse = self
            .call(
                "track.getsimilar",
                &[
                    ("artist", artist),
                    ("track", track),
                    ("autocorrect", "1"),
                    ("limit", limit_param.as_str()),
                ],
            )
            .await?;

        let tracks = models::tracks(resp.similartracks);
        log::debug!("Last.fm found {} tracks similar to '{}'", tracks.len(), track);
        Ok(tracks)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>> {
        let limit_param = limit.to_string();
        let resp: SearchResponse = self
            .call(
                "track.search",
                &[("track", query), ("limit", limit_param.as_str())],
            )
            .await?;
        Ok(models::tracks(resp.results.trackmatches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_body_with_ok_status() {
        let body = json!({ "error": 6, "message": "Track not found" }).to_string();
        let err = parse_response::<SimilarTracksResponse>(200, &body).unwrap_err();
        assert_eq!(
            err,
            ProviderError::Api {
                status: 200,
                message: "Last.fm error 6: Track not found".to_string()
            }
        );
    }

    #[test]
    fn test_http_failure_without_json() {
        let err = parse_response::<RecentTracksResponse>(503, "Service Unavailable").unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 503, .. }));
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        let err = parse_response::<RecentTracksResponse>(200, "<html>").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_successful_body() {
        let body = json!({
            "similartracks": { "track": [{ "name": "Alison", "match": "0.8", "artist": { "name": "Slowdive" } }] }
        })
        .to_string();
        let parsed = parse_response::<SimilarTracksResponse>(200, &body).unwrap();
        assert_eq!(models::tracks(parsed.similartracks)[0].match_score, Some(0.8));
    }

    #[test]
    fn test_config_requires_credentials() {
        assert!(LastFmProvider::from_json(json!({ "api_key": "", "username": "me" })).is_err());
        assert!(LastFmProvider::from_json(json!({ "username": "me" })).is_err());

        let provider =
            LastFmProvider::from_json(json!({ "api_key": "k", "username": "me" })).unwrap();
        assert_eq!(provider.config.base_url, API_BASE_URL);
        assert_eq!(provider.id(), ProviderId::LastFm);
        assert!(!provider.supports_audio_features());
    }

    #[test]
    fn test_period_mapping() {
        assert_eq!(period(TimeWindow::Short), "1month");
        assert_eq!(period(TimeWindow::Medium), "3month");
        assert_eq!(period(TimeWindow::Long), "12month");
    }
}
