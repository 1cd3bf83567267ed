//! Playlist ordering and summary statistics.
//!
//! Everything here is pure and synchronous: no I/O, no shared state.

pub mod camelot;
pub mod metadata;
pub mod models;
pub mod sequencer;

pub use camelot::{key_compatibility, CamelotKey};
pub use metadata::summarize;
pub use models::{Mood, Playlist, PlaylistMetadata, PlaylistTrack};
pub use sequencer::{sequence, transition_score};
