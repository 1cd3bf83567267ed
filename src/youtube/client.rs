use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::config::*;
use super::models::ErrorResponse;
use crate::errors::ProviderError;

/// Authenticated GET access to the Data API.
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    config: YouTubeConfig,
}

impl YouTubeClient {
    pub fn new(config: YouTubeConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &YouTubeConfig {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let mut query: Vec<(&str, &str)> = params.to_vec();
        if let Some(key) = self.config.api_key.as_deref() {
            query.push(("key", key));
        }

        let base = self.config.base_url.trim_end_matches('/');
        let url = reqwest::Url::parse_with_params(&format!("{}{}", base, path), &query)
            .map_err(|e| ProviderError::Network(format!("URL parse error: {}", e)))?;

        log::debug!("YouTube request: {}", path);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}

fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ProviderError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        log::warn!("YouTube API error ({}): {}", status, message);
        return Err(ProviderError::Api { status, message });
    }

    Ok(serde_json::from_str(body)?)
}
