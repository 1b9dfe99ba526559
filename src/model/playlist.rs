use super::TrackAnalysis;
use serde::Serialize;
use std::path::PathBuf;

/// One ordered playlist slot
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistEntry {
    /// Path to the audio file
    pub track: PathBuf,

    /// Full analysis for the track
    pub analysis: TrackAnalysis,

    /// Mix compatibility with the preceding entry; the first entry has no
    /// predecessor and gets 1.0 by convention
    pub transition_score: f32,
}
