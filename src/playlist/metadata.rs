use crate::models::{AudioFeatures, Track};
use crate::playlist::models::{Mood, PlaylistMetadata};
use crate::providers::ProviderId;

/// Valence assumed when no track reports one
const NEUTRAL_VALENCE: f64 = 0.5;

fn mean_of<F>(tracks: &[Track], field: F) -> Option<f64>
where
    F: Fn(&AudioFeatures) -> Option<f64>,
{
    let values: Vec<f64> = tracks
        .iter()
        .filter_map(|t| t.audio_features.as_ref())
        .filter_map(field)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Most frequent key; on a tie the key encountered first wins.
fn dominant_key(tracks: &[Track]) -> Option<u8> {
    let mut counts: Vec<(u8, usize)> = Vec::new();
    for key in tracks
        .iter()
        .filter_map(|t| t.audio_features.as_ref().and_then(|f| f.key))
    {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }

    let mut best: Option<(u8, usize)> = None;
    for (key, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(key, _)| key)
}

/// Providers in order of their first track.
fn source_providers(tracks: &[Track]) -> Vec<ProviderId> {
    let mut providers = Vec::new();
    for track in tracks {
        if !providers.contains(&track.source) {
            providers.push(track.source);
        }
    }
    providers
}

pub fn summarize(tracks: &[Track]) -> PlaylistMetadata {
    let total_duration_seconds = tracks
        .iter()
        .map(|t| u64::from(t.duration_seconds.unwrap_or(0)))
        .sum();

    let average_tempo = mean_of(tracks, |f| f.tempo).unwrap_or(0.0);
    let energy_level = mean_of(tracks, |f| f.energy).unwrap_or(0.0);
    let valence = mean_of(tracks, |f| f.valence).unwrap_or(NEUTRAL_VALENCE);

    PlaylistMetadata {
        total_duration_seconds,
        average_tempo,
        dominant_key: dominant_key(tracks),
        energy_level,
        mood: Mood::from_valence_energy(valence, energy_level),
        source_providers: source_providers(tracks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_with(valence: f64, energy: f64) -> Track {
        Track::new("t", "a", ProviderId::Spotify, "id").with_features(AudioFeatures {
            valence: Some(valence),
            energy: Some(energy),
            ..Default::default()
        })
    }

    #[test]
    fn test_happy_mood() {
        let tracks = vec![
            track_with(0.8, 0.7),
            track_with(0.7, 0.65),
            track_with(0.75, 0.8),
        ];
        let metadata = summarize(&tracks);
        assert_eq!(metadata.mood, Mood::Happy);
        assert!((metadata.energy_level - 0.7166666666666667).abs() < 1e-9);
    }

    #[test]
    fn test_no_features_is_neutral() {
        let tracks = vec![
            Track::new("a", "x", ProviderId::LastFm, "1").with_duration(180),
            Track::new("b", "y", ProviderId::LastFm, "2"),
        ];
        let metadata = summarize(&tracks);
        assert_eq!(metadata.mood, Mood::Neutral);
        assert_eq!(metadata.average_tempo, 0.0);
        assert_eq!(metadata.energy_level, 0.0);
        assert_eq!(metadata.dominant_key, None);
        assert_eq!(metadata.total_duration_seconds, 180);
        assert_eq!(metadata.source_providers, vec![ProviderId::LastFm]);
    }

    #[test]
    fn test_tempo_averages_only_present_values() {
        let tracks = vec![
            Track::new("a", "x", ProviderId::Spotify, "1").with_features(AudioFeatures {
                tempo: Some(100.0),
                ..Default::default()
            }),
            Track::new("b", "y", ProviderId::Spotify, "2").with_features(AudioFeatures::default()),
            Track::new("c", "z", ProviderId::Spotify, "3").with_features(AudioFeatures {
                tempo: Some(140.0),
                ..Default::default()
            }),
        ];
        assert!((summarize(&tracks).average_tempo - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_dominant_key_tie_goes_to_first_seen() {
        let keyed = |key: u8| {
            Track::new("t", "a", ProviderId::Spotify, "id")
                .with_features(AudioFeatures::with_key(key))
        };
        let tracks = vec![keyed(9), keyed(2), keyed(2), keyed(9), keyed(4)];
        assert_eq!(summarize(&tracks).dominant_key, Some(9));

        let tracks = vec![keyed(9), keyed(2), keyed(2)];
        assert_eq!(summarize(&tracks).dominant_key, Some(2));
    }

    #[test]
    fn test_source_providers_in_first_seen_order() {
        let tracks = vec![
            Track::new("a", "x", ProviderId::LastFm, "1"),
            Track::new("b", "y", ProviderId::Spotify, "2"),
            Track::new("c", "z", ProviderId::LastFm, "3"),
        ];
        assert_eq!(
            summarize(&tracks).source_providers,
            vec![ProviderId::LastFm, ProviderId::Spotify]
        );
    }

    #[test]
    fn test_empty_playlist() {
        let metadata = summarize(&[]);
        assert_eq!(metadata.total_duration_seconds, 0);
        assert_eq!(metadata.mood, Mood::Neutral);
        assert!(metadata.source_providers.is_empty());
    }
}
