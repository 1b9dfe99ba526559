//! Pairwise mix compatibility
//!
//! Three component scores: tempo distance, harmonic key match, and energy
//! distance. The key component asks whether the first track's Camelot code
//! appears among the second track's harmonic matches, so the score is
//! directional: compatibility(a, b) is "how well does b follow a".

use crate::model::TrackAnalysis;
use serde::Serialize;

/// Distance scales for the tempo and energy components
#[derive(Debug, Clone, Copy)]
pub struct MixScales {
    /// BPM difference at which the tempo score reaches 0
    pub tempo_diff_scale: f32,
    /// Energy difference at which the energy score reaches 0
    pub energy_diff_scale: f32,
}

impl Default for MixScales {
    fn default() -> Self {
        Self {
            tempo_diff_scale: 20.0,
            energy_diff_scale: 0.5,
        }
    }
}

/// Compatibility scores for an ordered track pair
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MixCompatibility {
    /// 1 at equal tempo, 0 at `tempo_diff_scale` BPM apart or more
    pub tempo_compatibility: f32,
    /// Whether the second track is a harmonic match for the first
    pub key_compatibility: bool,
    /// 1 at equal average RMS energy, 0 at `energy_diff_scale` apart or more
    pub energy_compatibility: f32,
    /// Mean of the three components, key counted as 0 or 1
    pub overall_score: f32,
}

/// Score how well `b` follows `a` in a mix.
pub fn mix_compatibility(a: &TrackAnalysis, b: &TrackAnalysis, scales: &MixScales) -> MixCompatibility {
    let tempo_compatibility =
        1.0 - ((a.tempo - b.tempo).abs() / scales.tempo_diff_scale).min(1.0);

    let key_compatibility = b.harmonic_matches.contains(&a.camelot);

    let energy_diff = (a.energy_levels.average_energy - b.energy_levels.average_energy).abs();
    let energy_compatibility = 1.0 - (energy_diff / scales.energy_diff_scale).min(1.0);

    let key_score = if key_compatibility { 1.0 } else { 0.0 };
    let overall_score = (tempo_compatibility + key_score + energy_compatibility) / 3.0;

    MixCompatibility {
        tempo_compatibility,
        key_compatibility,
        energy_compatibility,
        overall_score,
    }
}
