//! Concurrent fan-out over provider adapters.
//!
//! One unit of work runs per (provider, capability) pair. Units settle
//! independently: a failure, timeout or cancellation is recorded as that
//! unit's outcome and never disturbs its siblings. The merged result is
//! assembled only after every unit has settled.

use crate::errors::ProviderError;
use crate::models::{Artist, AudioFeatures, Track};
use crate::providers::traits::ProviderAdapter;
use crate::providers::types::{ProviderId, TimeWindow};
use futures_util::future::join_all;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A capability invocation with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    RecentTracks { limit: usize },
    TopTracks { window: TimeWindow, limit: usize },
    TopArtists { window: TimeWindow, limit: usize },
    SimilarTracks { artist: String, track: String, limit: usize },
    AudioFeatures { track_ids: Vec<String> },
    Search { query: String, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    RecentTracks,
    TopTracks,
    TopArtists,
    SimilarTracks,
    AudioFeatures,
    Search,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapabilityKind::RecentTracks => "recent_tracks",
            CapabilityKind::TopTracks => "top_tracks",
            CapabilityKind::TopArtists => "top_artists",
            CapabilityKind::SimilarTracks => "similar_tracks",
            CapabilityKind::AudioFeatures => "audio_features",
            CapabilityKind::Search => "search",
        };
        write!(f, "{}", s)
    }
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::RecentTracks { .. } => CapabilityKind::RecentTracks,
            Capability::TopTracks { .. } => CapabilityKind::TopTracks,
            Capability::TopArtists { .. } => CapabilityKind::TopArtists,
            Capability::SimilarTracks { .. } => CapabilityKind::SimilarTracks,
            Capability::AudioFeatures { .. } => CapabilityKind::AudioFeatures,
            Capability::Search { .. } => CapabilityKind::Search,
        }
    }
}

/// One unit of work for the aggregator.
#[derive(Clone)]
pub struct ProviderCall {
    pub provider: Arc<dyn ProviderAdapter>,
    pub capability: Capability,
}

impl ProviderCall {
    pub fn new(provider: Arc<dyn ProviderAdapter>, capability: Capability) -> Self {
        Self {
            provider,
            capability,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Tracks(Vec<Track>),
    Artists(Vec<Artist>),
    AudioFeatures(Vec<Option<AudioFeatures>>),
}

/// The settled result of one unit.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub provider: ProviderId,
    pub capability: Capability,
    pub result: Result<Payload, ProviderError>,
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every outcome, in the order the calls were submitted.
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    outcomes: Vec<CallOutcome>,
}

impl AggregateResult {
    pub fn outcomes(&self) -> &[CallOutcome] {
        &self.outcomes
    }

    /// Tracks from every successful call of `kind`, concatenated in
    /// submission order. Not deduplicated.
    pub fn tracks(&self, kind: CapabilityKind) -> Vec<Track> {
        self.successes(kind)
            .filter_map(|payload| match payload {
                Payload::Tracks(tracks) => Some(tracks.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Tracks from every successful call regardless of capability.
    pub fn all_tracks(&self) -> Vec<Track> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.result {
                Ok(Payload::Tracks(tracks)) => Some(tracks.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn artists(&self, kind: CapabilityKind) -> Vec<Artist> {
        self.successes(kind)
            .filter_map(|payload| match payload {
                Payload::Artists(artists) => Some(artists.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CallOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// True when calls were made and none of them succeeded.
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.success_count() == 0
    }

    fn successes(&self, kind: CapabilityKind) -> impl Iterator<Item = &Payload> {
        self.outcomes
            .iter()
            .filter(move |o| o.capability.kind() == kind)
            .filter_map(|o| o.result.as_ref().ok())
    }
}

pub struct Aggregator {
    call_timeout: Duration,
}

impl Aggregator {
    pub fn new(call_timeout: Duration) -> Self {
        Self { call_timeout }
    }

    pub async fn collect(&self, calls: Vec<ProviderCall>) -> AggregateResult {
        self.collect_with_cancel(calls, &CancellationToken::new())
            .await
    }

    /// Run every call concurrently and wait for all of them to settle.
    ///
    /// Cancelling `token` settles the in-flight calls as `Cancelled`; it
    /// is never an error for the aggregate as a whole.
    pub async fn collect_with_cancel(
        &self,
        calls: Vec<ProviderCall>,
        token: &CancellationToken,
    ) -> AggregateResult {
        let total = calls.len();
        let units = calls
            .into_iter()
            .map(|call| run_unit(call, self.call_timeout, token.clone()));

        let outcomes = join_all(units).await;
        let result = AggregateResult { outcomes };

        log::info!(
            "Aggregation settled: {}/{} provider calls succeeded",
            result.success_count(),
            total
        );
        if result.all_failed() {
            log::warn!("Every provider call failed, continuing with an empty aggregate");
        }

        result
    }
}

async fn run_unit(call: ProviderCall, timeout: Duration, token: CancellationToken) -> CallOutcome {
    let ProviderCall {
        provider,
        capability,
    } = call;

    let result = {
        let invocation = tokio::time::timeout(timeout, invoke(provider.as_ref(), &capability));
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(ProviderError::Cancelled),
            settled = invocation => match settled {
                Ok(Ok(payload)) => Ok(payload),
                Ok(Err(e)) => Err(ProviderError::from(e)),
                Err(_) => Err(ProviderError::TimedOut),
            },
        }
    };

    match &result {
        Ok(_) => log::debug!("{} {} succeeded", provider.id(), capability.kind()),
        Err(e) => log::warn!("{} {} failed: {}", provider.id(), capability.kind(), e),
    }

    CallOutcome {
        provider: provider.id(),
        capability,
        result,
    }
}

async fn invoke(
    provider: &dyn ProviderAdapter,
    capability: &Capability,
) -> anyhow::Result<Payload> {
    match capability {
        Capability::RecentTracks { limit } => provider
            .fetch_recent_tracks(*limit)
            .await
            .map(Payload::Tracks),
        Capability::TopTracks { window, limit } => provider
            .fetch_top_tracks(*window, *limit)
            .await
            .map(Payload::Tracks),
        Capability::TopArtists { window, limit } => provider
            .fetch_top_artists(*window, *limit)
            .await
            .map(Payload::Artists),
        Capability::SimilarTracks {
            artist,
            track,
            limit,
        } => provider
            .fetch_similar_tracks(artist, track, *limit)
            .await
            .map(Payload::Tracks),
        Capability::AudioFeatures { track_ids } => provider
            .fetch_audio_features(track_ids)
            .await
            .map(Payload::AudioFeatures),
        Capability::Search { query, limit } => {
            provider.search(query, *limit).await.map(Payload::Tracks)
        }
    }
}
