//! Track analysis core
//!
//! The aggregator decodes a file once, runs the external analysis engine
//! (stratum-dsp) for tempo/key/beats, derives the heuristic features and
//! labels, and assembles one `TrackAnalysis`. Exposed as a pure
//! path-to-result function so any front end can call it without inheriting
//! UI concerns.

mod analyzer;
mod beat_grid;
mod energy;
mod engine;
mod genre;
mod key_changes;
mod mood;
mod waveform;

pub use analyzer::{AnalyzerConfig, TrackAnalyzer};
pub use beat_grid::analyze_beat_grid;
pub use energy::analyze_energy_levels;
pub use genre::{classify_genre, GenreThresholds};
pub use key_changes::detect_key_changes;
pub use mood::{estimate_mood, MoodThresholds};
pub use waveform::render_waveform_png;
