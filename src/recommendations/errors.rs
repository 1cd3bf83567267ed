//! Typed errors for the recommendation system.
//!
//! Uses `thiserror` for ergonomic error definitions and implements
//! `Serialize` so errors can be returned as JSON by the service layer.

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to callers of the engine.
///
/// Individual provider failures never appear here; they are absorbed by
/// the aggregator and only shrink the candidate pool.
#[derive(Debug, Clone, Error, Serialize, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum RecommendationError {
    /// The caller supplied no connected providers
    #[error("No music providers connected")]
    NoProvidersConnected,

    /// Aggregation and filtering left nothing to recommend
    #[error("No recommendations available")]
    NoRecommendationsAvailable,

    /// Malformed request options
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Engine configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RecommendationError {
    fn from(e: serde_json::Error) -> Self {
        RecommendationError::Config(e.to_string())
    }
}
