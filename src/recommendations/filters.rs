//! Extension points for mood and genre refinement.
//!
//! The engine only calls these when the request names a mood or genre.
//! `PassThrough` is the default for both and returns tracks unchanged.

use crate::models::Track;
use crate::playlist::Mood;

pub trait MoodFilter: Send + Sync {
    fn filter(&self, tracks: Vec<Track>, mood: Mood) -> Vec<Track>;
}

pub trait GenreFilter: Send + Sync {
    fn filter(&self, tracks: Vec<Track>, genre: &str) -> Vec<Track>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl MoodFilter for PassThrough {
    fn filter(&self, tracks: Vec<Track>, _mood: Mood) -> Vec<Track> {
        tracks
    }
}

impl GenreFilter for PassThrough {
    fn filter(&self, tracks: Vec<Track>, _genre: &str) -> Vec<Track> {
        tracks
    }
}
