//! Analysis result data model
//!
//! These structures are what the analyzer produces and what every front end
//! (CLI, exports, reports) consumes. A `TrackAnalysis` is immutable once
//! built; playlist and mix structures are derived on demand.

mod playlist;
mod track;

pub use playlist::PlaylistEntry;
pub use track::{
    BeatGrid, EnergyLevels, EnergySegment, GenreAnalysis, GenreFeatures, GenreLabel, KeyChange,
    MoodAnalysis, MoodFeatures, MoodLabel, MoodScores, TrackAnalysis,
};
