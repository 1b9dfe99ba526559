//! Mood estimation
//!
//! An ordered rule table maps the raw feature snapshot to one label; the
//! first matching rule wins and the last rule always matches. A four-way
//! score map is computed independently from its own formulas, so the label
//! and the highest score can disagree. That mismatch is inherited from the
//! reference heuristics and kept as-is.

use crate::model::{MoodAnalysis, MoodFeatures, MoodLabel, MoodScores};

/// Thresholds and scales for the mood rules and score formulas
#[derive(Debug, Clone, Copy)]
pub struct MoodThresholds {
    pub energetic_min_tempo: f32,
    pub energetic_min_energy: f32,
    pub calm_max_tempo: f32,
    pub calm_max_energy: f32,
    pub dark_min_contrast: f32,
    pub dark_max_brightness: f32,

    /// Tempo normalization for score formulas (BPM)
    pub tempo_scale: f32,
    pub energy_scale: f32,
    pub contrast_scale: f32,
    pub brightness_scale: f32,
}

impl Default for MoodThresholds {
    fn default() -> Self {
        Self {
            energetic_min_tempo: 130.0,
            energetic_min_energy: 0.7,
            calm_max_tempo: 100.0,
            calm_max_energy: 0.4,
            dark_min_contrast: 0.6,
            dark_max_brightness: 0.5,
            tempo_scale: 180.0,
            energy_scale: 0.8,
            contrast_scale: 0.8,
            brightness_scale: 0.8,
        }
    }
}

/// One (predicate, label) pair in the ordered rule table
pub struct MoodRule {
    pub label: MoodLabel,
    pub applies: fn(&MoodFeatures, &MoodThresholds) -> bool,
}

fn is_energetic(f: &MoodFeatures, t: &MoodThresholds) -> bool {
    f.tempo > t.energetic_min_tempo && f.energy > t.energetic_min_energy
}

fn is_calm(f: &MoodFeatures, t: &MoodThresholds) -> bool {
    f.tempo < t.calm_max_tempo && f.energy < t.calm_max_energy
}

fn is_dark(f: &MoodFeatures, t: &MoodThresholds) -> bool {
    f.contrast > t.dark_min_contrast && f.brightness < t.dark_max_brightness
}

fn always(_: &MoodFeatures, _: &MoodThresholds) -> bool {
    true
}

/// Priority-ordered rule table; evaluation stops at the first match
pub const MOOD_RULES: &[MoodRule] = &[
    MoodRule {
        label: MoodLabel::Energetic,
        applies: is_energetic,
    },
    MoodRule {
        label: MoodLabel::Calm,
        applies: is_calm,
    },
    MoodRule {
        label: MoodLabel::Dark,
        applies: is_dark,
    },
    MoodRule {
        label: MoodLabel::Sad,
        applies: always,
    },
];

/// Classify a feature snapshot into a mood label plus score map
pub fn estimate_mood(features: MoodFeatures, thresholds: &MoodThresholds) -> MoodAnalysis {
    let primary_mood = MOOD_RULES
        .iter()
        .find(|rule| (rule.applies)(&features, thresholds))
        .map(|rule| rule.label)
        .unwrap_or(MoodLabel::Sad);

    let t = thresholds;
    let tempo_norm = features.tempo / t.tempo_scale;
    let energy_norm = features.energy / t.energy_scale;
    let contrast_norm = features.contrast / t.contrast_scale;
    let brightness_norm = features.brightness / t.brightness_scale;

    let mood_scores = MoodScores {
        energetic: (tempo_norm * energy_norm).clamp(0.0, 1.0),
        calm: ((1.0 - tempo_norm) * (1.0 - energy_norm)).clamp(0.0, 1.0),
        dark: (contrast_norm * (1.0 - brightness_norm)).clamp(0.0, 1.0),
        sad: ((1.0 - contrast_norm) * brightness_norm).clamp(0.0, 1.0),
    };

    MoodAnalysis {
        primary_mood,
        mood_scores,
        features,
    }
}
