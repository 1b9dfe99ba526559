//! Audet - audio track analyzer for DJs
//!
//! Analyzes audio files for tempo, key (with Camelot wheel codes), mood,
//! genre, energy profile, and beat grid, then builds on those results with
//! pairwise mix compatibility scoring, playlist ordering, and HTML/JSON
//! report export.

pub mod analysis;
pub mod camelot;
pub mod decode;
pub mod error;
pub mod export;
pub mod features;
pub mod mix;
pub mod model;

pub use analysis::{AnalyzerConfig, TrackAnalyzer};
pub use camelot::Camelot;
pub use error::AnalysisError;
pub use mix::{mix_compatibility, order_playlist, AnalyzedTrack, MixScales};
pub use model::TrackAnalysis;
