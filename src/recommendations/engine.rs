//! Recommendation engine implementation.
//!
//! Generates recommendations and playlists by:
//! 1. Fanning seed requests out to every connected provider
//! 2. Merging and deduplicating what comes back
//! 3. Blending familiar and novel candidates by exploration level
//! 4. Ordering playlist tracks for smooth transitions
//!
//! The engine holds no per-user state. Profile and providers are passed
//! into every call.

use crate::models::{AudioFeatures, ListeningProfile, Track};
use crate::playlist::{sequence, summarize, Playlist};
use crate::providers::{
    Aggregator, Capability, CapabilityKind, Payload, ProviderCall, ProviderId, ProviderRegistry,
};
use crate::recommendations::config::EngineConfig;
use crate::recommendations::dedup::{dedupe_artists, dedupe_tracks};
use crate::recommendations::errors::RecommendationError;
use crate::recommendations::exploration::{filter_by_exploration, ExplorationLevel};
use crate::recommendations::filters::{GenreFilter, MoodFilter, PassThrough};
use crate::recommendations::genres::analyze_genres;
use crate::recommendations::types::{ListeningInsights, PlaylistOptions, RecommendationOptions};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Playlists draw from this many times their length in candidates.
const PLAYLIST_CANDIDATE_FACTOR: usize = 2;

/// Engine for generating recommendations and playlists.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct RecommendationEngine {
    config: EngineConfig,
    aggregator: Aggregator,
    mood_filter: Arc<dyn MoodFilter>,
    genre_filter: Arc<dyn GenreFilter>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            aggregator: Aggregator::new(config.call_timeout()),
            config,
            mood_filter: Arc::new(PassThrough),
            genre_filter: Arc::new(PassThrough),
        }
    }

    pub fn with_mood_filter(mut self, filter: Arc<dyn MoodFilter>) -> Self {
        self.mood_filter = filter;
        self
    }

    pub fn with_genre_filter(mut self, filter: Arc<dyn GenreFilter>) -> Self {
        self.genre_filter = filter;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn ensure_connected(providers: &ProviderRegistry) -> Result<(), RecommendationError> {
        if providers.is_empty() {
            log::warn!("No providers connected, nothing to aggregate");
            return Err(RecommendationError::NoProvidersConnected);
        }
        Ok(())
    }

    pub async fn collect_profile(
        &self,
        providers: &ProviderRegistry,
    ) -> Result<ListeningProfile, RecommendationError> {
        self.collect_profile_with_cancel(providers, &CancellationToken::new())
            .await
    }

    /// Pull history from every provider and merge it into one profile.
    pub async fn collect_profile_with_cancel(
        &self,
        providers: &ProviderRegistry,
        token: &CancellationToken,
    ) -> Result<ListeningProfile, RecommendationError> {
        Self::ensure_connected(providers)?;

        let limit = self.config.history_limit;
        let window = self.config.top_window;
        let calls: Vec<ProviderCall> = providers
            .iter()
            .flat_map(|provider| {
                [
                    Capability::RecentTracks { limit },
                    Capability::TopTracks { window, limit },
                    Capability::TopArtists { window, limit },
                ]
                .into_iter()
                .map(|capability| ProviderCall::new(provider.clone(), capability))
            })
            .collect();

        let result = self.aggregator.collect_with_cancel(calls, token).await;

        let top_artists = dedupe_artists(result.artists(CapabilityKind::TopArtists));
        let profile = ListeningProfile {
            recent_tracks: dedupe_tracks(result.tracks(CapabilityKind::RecentTracks)),
            top_tracks: dedupe_tracks(result.tracks(CapabilityKind::TopTracks)),
            top_genres: analyze_genres(&top_artists),
            top_artists,
        };

        log::info!(
            "Profile collected: {} recent, {} top tracks, {} top artists, {} genres",
            profile.recent_tracks.len(),
            profile.top_tracks.len(),
            profile.top_artists.len(),
            profile.top_genres.len()
        );

        Ok(profile)
    }

    pub fn insights(&self, profile: &ListeningProfile) -> ListeningInsights {
        ListeningInsights::from(profile)
    }

    pub async fn generate_recommendations(
        &self,
        profile: &ListeningProfile,
        providers: &ProviderRegistry,
        options: &RecommendationOptions,
    ) -> Result<Vec<Track>, RecommendationError> {
        self.generate_recommendations_with_cancel(
            profile,
            providers,
            options,
            &CancellationToken::new(),
        )
        .await
    }

    pub async fn generate_recommendations_with_cancel(
        &self,
        profile: &ListeningProfile,
        providers: &ProviderRegistry,
        options: &RecommendationOptions,
        token: &CancellationToken,
    ) -> Result<Vec<Track>, RecommendationError> {
        Self::ensure_connected(providers)?;

        let limit = positive(options.limit, self.config.default_recommendation_limit, "limit")?;
        let level = ExplorationLevel::new(
            options
                .exploration_level
                .unwrap_or(self.config.default_exploration_level),
        )?;

        log::info!(
            "Generating up to {} recommendations from {} providers (exploration {:.2})",
            limit,
            providers.len(),
            level.value()
        );

        // 1. Build the candidate pool from every provider's seeds
        let calls = self.seed_calls(profile, providers);
        let collected = self.aggregator.collect_with_cancel(calls, token).await;
        let pool = dedupe_tracks(collected.all_tracks());
        log::debug!("Candidate pool: {} unique tracks", pool.len());

        // 2. Explore/exploit blend
        let mut tracks = filter_by_exploration(pool, level);
        log::debug!("{} tracks after exploration filter", tracks.len());

        // 3. Optional refinement hooks
        if let Some(mood) = options.mood {
            tracks = self.mood_filter.filter(tracks, mood);
        }
        if let Some(genre) = options.genre.as_deref() {
            tracks = self.genre_filter.filter(tracks, genre);
        }

        if tracks.is_empty() {
            log::warn!("No recommendations left after filtering");
            return Err(RecommendationError::NoRecommendationsAvailable);
        }

        tracks.truncate(limit);
        log::info!("Recommendations ready: {} tracks", tracks.len());
        Ok(tracks)
    }

    /// Recommendations biased toward unfamiliar music.
    pub async fn discover(
        &self,
        profile: &ListeningProfile,
        providers: &ProviderRegistry,
        limit: Option<usize>,
    ) -> Result<Vec<Track>, RecommendationError> {
        let options = RecommendationOptions {
            limit,
            exploration_level: Some(self.config.discovery_exploration_level),
            ..Default::default()
        };
        self.generate_recommendations(profile, providers, &options)
            .await
    }

    pub async fn generate_playlist(
        &self,
        profile: &ListeningProfile,
        providers: &ProviderRegistry,
        options: &PlaylistOptions,
    ) -> Result<Playlist, RecommendationError> {
        self.generate_playlist_with_cancel(profile, providers, options, &CancellationToken::new())
            .await
    }

    pub async fn generate_playlist_with_cancel(
        &self,
        profile: &ListeningProfile,
        providers: &ProviderRegistry,
        options: &PlaylistOptions,
        token: &CancellationToken,
    ) -> Result<Playlist, RecommendationError> {
        Self::ensure_connected(providers)?;

        let length = positive(options.length, self.config.default_playlist_length, "length")?;

        // 1. Over-fetch so the sequencer has room to choose
        let request = RecommendationOptions {
            limit: Some(length.saturating_mul(PLAYLIST_CANDIDATE_FACTOR)),
            exploration_level: options.exploration_level,
            mood: options.mood,
            genre: options.genre.clone(),
        };
        let candidates = self
            .generate_recommendations_with_cancel(profile, providers, &request, token)
            .await?;

        // 2. Attach acoustic analysis where a provider offers it
        let mut tracks = self.enrich_features(candidates, providers, token).await;
        tracks.truncate(length);

        // 3. Order for smooth transitions and summarise
        let ordered = sequence(tracks);
        let metadata = summarize(&ordered);
        let playlist = Playlist::new(
            options.name.clone(),
            options.description.clone(),
            ordered,
            metadata,
        );

        log::info!(
            "Playlist '{}' ready: {} tracks, mood {}",
            playlist.name,
            playlist.len(),
            playlist.metadata.mood
        );

        Ok(playlist)
    }

    pub async fn find_similar_tracks(
        &self,
        providers: &ProviderRegistry,
        name: &str,
        artist: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Track>, RecommendationError> {
        self.find_similar_tracks_with_cancel(
            providers,
            name,
            artist,
            limit,
            &CancellationToken::new(),
        )
        .await
    }

    /// Tracks similar to one named track, merged across providers.
    ///
    /// An empty result is not an error here.
    pub async fn find_similar_tracks_with_cancel(
        &self,
        providers: &ProviderRegistry,
        name: &str,
        artist: &str,
        limit: Option<usize>,
        token: &CancellationToken,
    ) -> Result<Vec<Track>, RecommendationError> {
        let (name, artist) = (name.trim(), artist.trim());
        if name.is_empty() || artist.is_empty() {
            return Err(RecommendationError::InvalidOption(
                "Track name and artist are required".to_string(),
            ));
        }
        Self::ensure_connected(providers)?;

        let limit = positive(limit, self.config.similar_tracks_limit, "limit")?;
        let calls = providers
            .iter()
            .map(|provider| {
                ProviderCall::new(
                    provider.clone(),
                    Capability::SimilarTracks {
                        artist: artist.to_string(),
                        track: name.to_string(),
                        limit,
                    },
                )
            })
            .collect();

        let result = self.aggregator.collect_with_cancel(calls, token).await;
        let mut tracks = dedupe_tracks(result.tracks(CapabilityKind::SimilarTracks));
        tracks.truncate(limit);

        log::info!(
            "Found {} tracks similar to '{}' by {}",
            tracks.len(),
            name,
            artist
        );
        Ok(tracks)
    }

    /// One similarity call per seed track and one search per seed artist,
    /// each addressed to the provider the seed came from.
    fn seed_calls(
        &self,
        profile: &ListeningProfile,
        providers: &ProviderRegistry,
    ) -> Vec<ProviderCall> {
        let limit = self.config.similar_per_seed;
        let mut calls = Vec::new();

        for provider in providers.iter() {
            let id = provider.id();
            for seed in profile.seed_tracks(id, self.config.seed_track_count) {
                calls.push(ProviderCall::new(
                    provider.clone(),
                    Capability::SimilarTracks {
                        artist: seed.artist.clone(),
                        track: seed.name.clone(),
                        limit,
                    },
                ));
            }
            for artist in profile.seed_artists(id, self.config.seed_artist_count) {
                calls.push(ProviderCall::new(
                    provider.clone(),
                    Capability::Search {
                        query: artist.name.clone(),
                        limit,
                    },
                ));
            }
        }

        if calls.is_empty() {
            log::warn!("Profile has no seeds for any connected provider");
        }
        calls
    }

    async fn enrich_features(
        &self,
        tracks: Vec<Track>,
        providers: &ProviderRegistry,
        token: &CancellationToken,
    ) -> Vec<Track> {
        let calls: Vec<ProviderCall> = providers
            .iter()
            .filter(|p| p.supports_audio_features())
            .filter_map(|provider| {
                let track_ids: Vec<String> = tracks
                    .iter()
                    .filter(|t| t.source == provider.id())
                    .map(|t| t.source_track_id.clone())
                    .collect();
                if track_ids.is_empty() {
                    None
                } else {
                    Some(ProviderCall::new(
                        provider.clone(),
                        Capability::AudioFeatures { track_ids },
                    ))
                }
            })
            .collect();

        if calls.is_empty() {
            return tracks;
        }

        let result = self.aggregator.collect_with_cancel(calls, token).await;

        let mut found: HashMap<(ProviderId, String), AudioFeatures> = HashMap::new();
        for outcome in result.outcomes() {
            let (Capability::AudioFeatures { track_ids }, Ok(Payload::AudioFeatures(features))) =
                (&outcome.capability, &outcome.result)
            else {
                continue;
            };
            if features.len() != track_ids.len() {
                log::debug!(
                    "{} returned {} feature sets for {} tracks",
                    outcome.provider,
                    features.len(),
                    track_ids.len()
                );
            }
            for (id, features) in track_ids.iter().zip(features) {
                if let Some(features) = features {
                    found.insert((outcome.provider, id.clone()), features.clone());
                }
            }
        }

        log::debug!("Attached audio features to {} tracks", found.len());

        tracks
            .into_iter()
            .map(|mut track| {
                if let Some(features) = found.get(&(track.source, track.source_track_id.clone())) {
                    track.audio_features = Some(features.clone());
                }
                track
            })
            .collect()
    }
}

/// A requested count, or the default when absent. Zero is rejected.
fn positive(
    requested: Option<usize>,
    default: usize,
    what: &str,
) -> Result<usize, RecommendationError> {
    match requested {
        Some(0) => Err(RecommendationError::InvalidOption(format!(
            "{} must be greater than zero",
            what
        ))),
        Some(n) => Ok(n),
        None => Ok(default),
    }
}
