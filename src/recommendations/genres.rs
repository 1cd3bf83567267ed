use crate::models::{Artist, GenreCount};
use std::collections::HashMap;

const MAX_GENRES: usize = 10;

/// Rank genre tags by how many artists carry them.
///
/// Ties keep the order in which the genre was first seen.
pub fn analyze_genres(artists: &[Artist]) -> Vec<GenreCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<GenreCount> = Vec::new();

    for genre in artists.iter().flat_map(|a| a.genres.iter()) {
        match index.get(genre.as_str()) {
            Some(&i) => ranked[i].count += 1,
            None => {
                index.insert(genre.as_str(), ranked.len());
                ranked.push(GenreCount {
                    name: genre.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order survives among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(MAX_GENRES);
    ranked
}
