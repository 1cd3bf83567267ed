//! Cross-provider deduplication.
//!
//! Provider ids are not comparable across catalogs, so identity is the
//! case-insensitive (name, artist) pair for tracks and the case-insensitive
//! name for artists. The first occurrence wins and input order is kept,
//! which makes both functions idempotent.

use crate::models::{Artist, Track};
use std::collections::HashSet;

const KEY_SEPARATOR: char = '\u{1f}';

pub fn track_key(track: &Track) -> String {
    format!(
        "{}{}{}",
        track.name.to_lowercase(),
        KEY_SEPARATOR,
        track.artist.to_lowercase()
    )
}

pub fn artist_key(artist: &Artist) -> String {
    artist.name.to_lowercase()
}

pub fn dedupe_tracks(tracks: Vec<Track>) -> Vec<Track> {
    let mut seen = HashSet::with_capacity(tracks.len());
    tracks
        .into_iter()
        .filter(|t| seen.insert(track_key(t)))
        .collect()
}

pub fn dedupe_artists(artists: Vec<Artist>) -> Vec<Artist> {
    let mut seen = HashSet::with_capacity(artists.len());
    artists
        .into_iter()
        .filter(|a| seen.insert(artist_key(a)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderId;

    fn track(name: &str, artist: &str, source: ProviderId) -> Track {
        Track::new(name, artist, source, name)
    }

    #[test]
    fn test_first_occurrence_wins() {
        let tracks = vec![
            track("Hey Jude", "The Beatles", ProviderId::Spotify),
            track("Yesterday", "The Beatles", ProviderId::Spotify),
            track("HEY JUDE", "the beatles", ProviderId::LastFm),
        ];

        let deduped = dedupe_tracks(tracks);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].source, ProviderId::Spotify);
        assert_eq!(deduped[1].name, "Yesterday");
    }

    #[test]
    fn test_dedupe_is_idempotent_and_pairwise_distinct() {
        let tracks = vec![
            track("a", "x", ProviderId::Spotify),
            track("A", "X", ProviderId::LastFm),
            track("b", "x", ProviderId::LastFm),
            track("a", "y", ProviderId::YouTube),
            track("B", "x", ProviderId::Spotify),
        ];

        let once = dedupe_tracks(tracks);
        let twice = dedupe_tracks(once.clone());
        assert_eq!(once, twice);

        let keys: HashSet<String> = once.iter().map(track_key).collect();
        assert_eq!(keys.len(), once.len());
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_separator_prevents_key_collisions() {
        // "ab" + "c" and "a" + "bc" must stay distinct
        let tracks = vec![
            track("ab", "c", ProviderId::Spotify),
            track("a", "bc", ProviderId::Spotify),
        ];
        assert_eq!(dedupe_tracks(tracks).len(), 2);
    }

    #[test]
    fn test_dedupe_artists_by_name() {
        let artists = vec![
            Artist::new("Radiohead", ProviderId::Spotify).with_genres(["rock"]),
            Artist::new("radiohead", ProviderId::LastFm),
            Artist::new("Portishead", ProviderId::LastFm),
        ];

        let deduped = dedupe_artists(artists);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].genres, vec!["rock".to_string()]);
    }
}
