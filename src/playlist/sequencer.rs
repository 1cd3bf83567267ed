//! Greedy nearest-neighbour track ordering.
//!
//! The first input track seeds the playlist. This is an arbitrary but
//! deterministic choice. Each following slot goes to the remaining
//! candidate with the highest transition score against the track just
//! placed. Ties keep the earliest candidate. Candidates without audio
//! features are never scored; when nothing can be scored the first
//! remaining candidate is taken. O(n²), which is fine for playlists of a
//! few dozen tracks.

use crate::models::{AudioFeatures, Track};
use crate::playlist::camelot::key_compatibility;

const TEMPO_WEIGHT: f64 = 0.30;
const KEY_WEIGHT: f64 = 0.20;
const ENERGY_WEIGHT: f64 = 0.20;
const VALENCE_WEIGHT: f64 = 0.15;
const DANCEABILITY_WEIGHT: f64 = 0.15;

/// Tempo gap, in BPM, at which the tempo term reaches zero
const TEMPO_TOLERANCE_BPM: f64 = 50.0;

fn closeness(a: Option<f64>, b: Option<f64>, span: f64) -> Option<f64> {
    let (a, b) = (a?, b?);
    Some((1.0 - (a - b).abs() / span).max(0.0))
}

/// Weighted similarity of two feature sets, in `[0, 1]`.
///
/// A term whose input is missing on either side is left out. The remaining
/// weights are not renormalised, so sparse feature sets score lower.
pub fn transition_score(a: &AudioFeatures, b: &AudioFeatures) -> f64 {
    let terms = [
        closeness(a.tempo, b.tempo, TEMPO_TOLERANCE_BPM).map(|s| s * TEMPO_WEIGHT),
        a.key
            .zip(b.key)
            .map(|(k1, k2)| key_compatibility(k1, k2) * KEY_WEIGHT),
        closeness(a.energy, b.energy, 1.0).map(|s| s * ENERGY_WEIGHT),
        closeness(a.valence, b.valence, 1.0).map(|s| s * VALENCE_WEIGHT),
        closeness(a.danceability, b.danceability, 1.0).map(|s| s * DANCEABILITY_WEIGHT),
    ];
    terms.into_iter().flatten().sum()
}

/// Index into `candidates` of the next track to place after `current`.
fn best_next(current: &Track, candidates: &[Track]) -> usize {
    let Some(current_features) = current.audio_features.as_ref() else {
        return 0;
    };

    let mut best_index = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(features) = candidate.audio_features.as_ref() else {
            continue;
        };
        let score = transition_score(current_features, features);
        if score > best_score {
            best_score = score;
            best_index = index;
        }
    }
    best_index
}

pub fn sequence(tracks: Vec<Track>) -> Vec<Track> {
    if tracks.len() <= 1 {
        return tracks;
    }

    let mut remaining = tracks;
    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(0));

    while !remaining.is_empty() {
        let last = &ordered[ordered.len() - 1];
        let next = best_next(last, &remaining);
        ordered.push(remaining.remove(next));
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderId;

    fn features(tempo: f64, key: u8, energy: f64) -> AudioFeatures {
        AudioFeatures {
            tempo: Some(tempo),
            key: Some(key),
            energy: Some(energy),
            valence: Some(0.5),
            danceability: Some(0.5),
            ..Default::default()
        }
    }

    fn track(name: &str, features: Option<AudioFeatures>) -> Track {
        let track = Track::new(name, "artist", ProviderId::Spotify, name);
        match features {
            Some(f) => track.with_features(f),
            None => track,
        }
    }

    fn names(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_identical_features_score_one() {
        let f = features(120.0, 5, 0.7);
        assert!((transition_score(&f, &f) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_terms() {
        let a = features(120.0, 0, 0.8);
        let b = features(145.0, 6, 0.3);

        // tempo 0.3 * 0.5, key 0.2 * 0.3, energy 0.2 * 0.5, valence 0.15, dance 0.15
        let expected = 0.15 + 0.06 + 0.10 + 0.15 + 0.15;
        assert!((transition_score(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_tempo_beyond_tolerance_contributes_nothing() {
        let a = AudioFeatures {
            tempo: Some(80.0),
            ..Default::default()
        };
        let b = AudioFeatures {
            tempo: Some(170.0),
            ..Default::default()
        };
        assert_eq!(transition_score(&a, &b), 0.0);
    }

    #[test]
    fn test_missing_terms_are_omitted_not_renormalised() {
        let a = AudioFeatures {
            energy: Some(0.5),
            key: Some(3),
            ..Default::default()
        };
        let b = AudioFeatures {
            energy: Some(0.5),
            tempo: Some(100.0),
            ..Default::default()
        };
        // Only energy is present on both sides
        assert!((transition_score(&a, &b) - ENERGY_WEIGHT).abs() < 1e-9);
        assert_eq!(transition_score(&AudioFeatures::default(), &b), 0.0);
    }

    #[test]
    fn test_key_term_values() {
        let same = transition_score(&AudioFeatures::with_key(0), &AudioFeatures::with_key(0));
        let adjacent = transition_score(&AudioFeatures::with_key(0), &AudioFeatures::with_key(5));
        let distant = transition_score(&AudioFeatures::with_key(0), &AudioFeatures::with_key(6));
        assert!((same - 1.0 * KEY_WEIGHT).abs() < 1e-9);
        assert!((adjacent - 0.8 * KEY_WEIGHT).abs() < 1e-9);
        assert!((distant - 0.3 * KEY_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_greedy_order_follows_nearest_neighbour() {
        let tracks = vec![
            track("start", Some(features(100.0, 0, 0.2))),
            track("far", Some(features(170.0, 6, 0.9))),
            track("near", Some(features(102.0, 0, 0.25))),
            track("middle", Some(features(135.0, 7, 0.55))),
        ];

        let ordered = sequence(tracks);
        assert_eq!(names(&ordered), vec!["start", "near", "middle", "far"]);
    }

    #[test]
    fn test_sequence_is_deterministic() {
        let tracks = vec![
            track("a", Some(features(120.0, 1, 0.5))),
            track("b", Some(features(121.0, 1, 0.5))),
            track("c", Some(features(121.0, 1, 0.5))),
            track("d", None),
            track("e", Some(features(90.0, 9, 0.1))),
        ];

        let first = sequence(tracks.clone());
        let second = sequence(tracks);
        assert_eq!(first, second);
        // b and c tie; the earlier one wins
        assert_eq!(&names(&first)[..3], &["a", "b", "c"]);
    }

    #[test]
    fn test_featureless_tracks_fall_back_to_input_order() {
        let tracks = vec![
            track("a", None),
            track("b", Some(features(120.0, 1, 0.5))),
            track("c", None),
            track("d", None),
        ];

        let ordered = sequence(tracks);
        assert_eq!(names(&ordered), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_featured_candidates_preferred_over_featureless() {
        let tracks = vec![
            track("seed", Some(features(120.0, 1, 0.5))),
            track("bare", None),
            track("rich", Some(features(60.0, 6, 0.0))),
        ];

        let ordered = sequence(tracks);
        assert_eq!(names(&ordered), vec!["seed", "rich", "bare"]);
    }

    #[test]
    fn test_featureless_current_takes_first_remaining() {
        let tracks = vec![
            track("seed", None),
            track("bare", None),
            track("rich", Some(features(120.0, 1, 0.5))),
        ];

        let ordered = sequence(tracks);
        assert_eq!(names(&ordered), vec!["seed", "bare", "rich"]);
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(sequence(Vec::new()).is_empty());
        let single = sequence(vec![track("only", None)]);
        assert_eq!(names(&single), vec!["only"]);
    }
}
