use serde::Serialize;
use thiserror::Error;

/// Why a single provider call produced nothing.
#[derive(Debug, Clone, Error, Serialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Provider call timed out")]
    TimedOut,

    #[error("Provider call cancelled")]
    Cancelled,

    #[error("Provider call failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Parse(e.to_string())
    }
}

impl From<anyhow::Error> for ProviderError {
    fn from(e: anyhow::Error) -> Self {
        // Adapters that raised a typed error keep it
        match e.downcast::<ProviderError>() {
            Ok(typed) => typed,
            Err(other) => ProviderError::Failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anyhow_conversion_keeps_typed_errors() {
        let typed: anyhow::Error = ProviderError::Api {
            status: 429,
            message: "slow down".to_string(),
        }
        .into();
        assert_eq!(
            ProviderError::from(typed),
            ProviderError::Api {
                status: 429,
                message: "slow down".to_string()
            }
        );

        let untyped = anyhow::anyhow!("socket closed");
        assert_eq!(
            ProviderError::from(untyped),
            ProviderError::Failed("socket closed".to_string())
        );
    }
}
