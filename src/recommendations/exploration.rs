//! Explore/exploit selection driven by a single scalar.

use crate::models::Track;
use crate::recommendations::errors::RecommendationError;
use serde::{Deserialize, Serialize};

/// Only tracks scoring above this survive at level 0.
const STRICT_FAMILIAR_THRESHOLD: f64 = 0.7;
/// Only unscored tracks or tracks below this survive at level 1.
const STRICT_NOVEL_THRESHOLD: f64 = 0.3;
/// Split point for the blended levels in between.
const BLEND_THRESHOLD: f64 = 0.5;
/// Absorbs rounding in `1 - level`, so `5 * (1 - 0.8)` floors to 1, not 0.
const QUOTA_EPSILON: f64 = 1e-9;

/// How far to stray from the listener's known taste, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ExplorationLevel(f64);

impl ExplorationLevel {
    pub const FAMILIAR: ExplorationLevel = ExplorationLevel(0.0);
    pub const NOVEL: ExplorationLevel = ExplorationLevel(1.0);

    /// Clamp into range. NaN carries no intent and is rejected.
    pub fn new(level: f64) -> Result<Self, RecommendationError> {
        if level.is_nan() {
            return Err(RecommendationError::InvalidOption(
                "exploration level must be a number".to_string(),
            ));
        }
        Ok(Self(level.clamp(0.0, 1.0)))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ExplorationLevel {
    type Error = RecommendationError;

    fn try_from(level: f64) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<ExplorationLevel> for f64 {
    fn from(level: ExplorationLevel) -> f64 {
        level.0
    }
}

fn is_familiar(track: &Track, threshold: f64) -> bool {
    track.match_score.is_some_and(|s| s > threshold)
}

fn is_novel(track: &Track, threshold: f64) -> bool {
    track.match_score.map_or(true, |s| s < threshold)
}

/// Select candidates according to `level`.
///
/// The extremes are strict filters. In between, the output takes
/// `floor(n * (1 - level))` familiar tracks followed by up to the remaining
/// quota of novel ones, each group in input order. A score of exactly 0.5
/// is neither familiar nor novel in the blend and is dropped.
pub fn filter_by_exploration(tracks: Vec<Track>, level: ExplorationLevel) -> Vec<Track> {
    let level = level.value();

    if level == 0.0 {
        return tracks
            .into_iter()
            .filter(|t| is_familiar(t, STRICT_FAMILIAR_THRESHOLD))
            .collect();
    }
    if level == 1.0 {
        return tracks
            .into_iter()
            .filter(|t| is_novel(t, STRICT_NOVEL_THRESHOLD))
            .collect();
    }

    let total = tracks.len();
    let familiar_quota = (total as f64 * (1.0 - level) + QUOTA_EPSILON).floor() as usize;
    let novel_quota = total - familiar_quota;

    let (familiar, rest): (Vec<Track>, Vec<Track>) = tracks
        .into_iter()
        .partition(|t| is_familiar(t, BLEND_THRESHOLD));

    log::debug!(
        "Exploration {:.2}: {} familiar (quota {}), novel quota {}",
        level,
        familiar.len(),
        familiar_quota,
        novel_quota
    );

    familiar
        .into_iter()
        .take(familiar_quota)
        .chain(
            rest.into_iter()
                .filter(|t| is_novel(t, BLEND_THRESHOLD))
                .take(novel_quota),
        )
        .collect()
}
