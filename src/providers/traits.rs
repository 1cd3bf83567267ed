use crate::models::{Artist, AudioFeatures, Track};
use crate::providers::types::{ProviderId, TimeWindow};
use anyhow::Result;
use async_trait::async_trait;

/// Uniform capability set every catalog service exposes to the engine.
///
/// Adapters own their transport, auth and retry policy. The engine only
/// relies on the return values and treats any `Err` as "this call produced
/// nothing".
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which catalog this adapter talks to
    fn id(&self) -> ProviderId;

    /// User-friendly name
    fn name(&self) -> &str;

    /// Listening history
    async fn fetch_recent_tracks(&self, limit: usize) -> Result<Vec<Track>>;
    async fn fetch_top_tracks(&self, window: TimeWindow, limit: usize) -> Result<Vec<Track>>;
    async fn fetch_top_artists(&self, window: TimeWindow, limit: usize) -> Result<Vec<Artist>>;

    /// Candidates similar to a seed track. Results should carry `match_score`
    /// when the catalog reports one.
    async fn fetch_similar_tracks(
        &self,
        artist: &str,
        track: &str,
        limit: usize,
    ) -> Result<Vec<Track>>;

    /// Acoustic analysis, positionally aligned with `track_ids`. Entries the
    /// catalog cannot analyse are `None`.
    ///
    /// Default implementation reports nothing, for providers without
    /// acoustic analysis.
    async fn fetch_audio_features(
        &self,
        _track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>> {
        Ok(Vec::new())
    }

    /// Whether `fetch_audio_features` returns anything meaningful
    fn supports_audio_features(&self) -> bool {
        false
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>>;
}
