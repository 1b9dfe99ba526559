//! Mixing helpers
//!
//! Pairwise mix compatibility scoring and energy-ordered playlist
//! generation on top of finished track analyses.

mod compatibility;
mod playlist;

pub use compatibility::{mix_compatibility, MixCompatibility, MixScales};
pub use playlist::{order_playlist, AnalyzedTrack};
