use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::config::*;
use super::models::ErrorResponse;
use crate::errors::ProviderError;

/// Authenticated GET access to the Web API.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let base = self.config.base_url.trim_end_matches('/');
        let url = reqwest::Url::parse_with_params(&format!("{}{}", base, path), params)
            .map_err(|e| ProviderError::Network(format!("URL parse error: {}", e)))?;

        log::debug!("Spotify request: {}", path);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("?")
                .to_string();
            log::warn!("Spotify rate limit (429) on {}, retry after {}s", path, retry_after);
        }

        let body = response.text().await?;
        parse_response(status.as_u16(), &body)
    }
}

fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ProviderError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        log::warn!("Spotify API error ({}): {}", status, message);
        return Err(ProviderError::Api { status, message });
    }

    Ok(serde_json::from_str(body)?)
}
