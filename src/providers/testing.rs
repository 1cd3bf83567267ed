//! Scriptable in-memory adapter for unit tests.

use crate::models::{Artist, AudioFeatures, Track};
use crate::providers::aggregator::CapabilityKind;
use crate::providers::traits::ProviderAdapter;
use crate::providers::types::{ProviderId, TimeWindow};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct FakeProvider {
    id: ProviderId,
    name: String,
    pub recent: Vec<Track>,
    pub top_tracks: Vec<Track>,
    pub top_artists: Vec<Artist>,
    pub similar: Vec<Track>,
    pub search_results: Vec<Track>,
    pub features: HashMap<String, AudioFeatures>,
    failing: HashSet<CapabilityKind>,
    fail_all: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<CapabilityKind>>,
}

impl FakeProvider {
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            name: id.to_string(),
            recent: Vec::new(),
            top_tracks: Vec::new(),
            top_artists: Vec::new(),
            similar: Vec::new(),
            search_results: Vec::new(),
            features: HashMap::new(),
            failing: HashSet::new(),
            fail_all: false,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_recent(mut self, tracks: Vec<Track>) -> Self {
        self.recent = tracks;
        self
    }

    pub fn with_top_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.top_tracks = tracks;
        self
    }

    pub fn with_top_artists(mut self, artists: Vec<Artist>) -> Self {
        self.top_artists = artists;
        self
    }

    pub fn with_similar(mut self, tracks: Vec<Track>) -> Self {
        self.similar = tracks;
        self
    }

    pub fn with_search_results(mut self, tracks: Vec<Track>) -> Self {
        self.search_results = tracks;
        self
    }

    pub fn with_features(mut self, track_id: &str, features: AudioFeatures) -> Self {
        self.features.insert(track_id.to_string(), features);
        self
    }

    pub fn failing(mut self, kind: CapabilityKind) -> Self {
        self.failing.insert(kind);
        self
    }

    pub fn failing_everything(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn into_arc(self) -> Arc<dyn ProviderAdapter> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<CapabilityKind> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, kind: CapabilityKind) -> Result<()> {
        self.calls.lock().unwrap().push(kind);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_all || self.failing.contains(&kind) {
            return Err(anyhow!("{} scripted failure for {}", self.id, kind));
        }
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for FakeProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_recent_tracks(&self, limit: usize) -> Result<Vec<Track>> {
        self.enter(CapabilityKind::RecentTracks).await?;
        Ok(self.recent.iter().take(limit).cloned().collect())
    }

    async fn fetch_top_tracks(&self, _window: TimeWindow, limit: usize) -> Result<Vec<Track>> {
        self.enter(CapabilityKind::TopTracks).await?;
        Ok(self.top_tracks.iter().take(limit).cloned().collect())
    }

    async fn fetch_top_artists(&self, _window: TimeWindow, limit: usize) -> Result<Vec<Artist>> {
        self.enter(CapabilityKind::TopArtists).await?;
        Ok(self.top_artists.iter().take(limit).cloned().collect())
    }

    async fn fetch_similar_tracks(
        &self,
        _artist: &str,
        _track: &str,
        limit: usize,
    ) -> Result<Vec<Track>> {
        self.enter(CapabilityKind::SimilarTracks).await?;
        Ok(self.similar.iter().take(limit).cloned().collect())
    }

    async fn fetch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>> {
        self.enter(CapabilityKind::AudioFeatures).await?;
        Ok(track_ids.iter().map(|id| self.features.get(id).cloned()).collect())
    }

    fn supports_audio_features(&self) -> bool {
        !self.features.is_empty()
    }

    async fn search(&self, _query: &str, limit: usize) -> Result<Vec<Track>> {
        self.enter(CapabilityKind::Search).await?;
        Ok(self.search_results.iter().take(limit).cloned().collect())
    }
}
