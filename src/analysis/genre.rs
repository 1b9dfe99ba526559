//! Genre classification
//!
//! Same shape as the mood estimator: an ordered rule table over MFCC
//! summary statistics and spectral means. The confidence value is the mean
//! of the MFCC std vector, which measures timbral spread rather than class
//! probability; it is reported under that caveat.

use crate::features::{SpectralMeans, TimbreStats};
use crate::model::{GenreAnalysis, GenreFeatures, GenreLabel};

/// Thresholds for the genre rules
#[derive(Debug, Clone, Copy)]
pub struct GenreThresholds {
    pub electronic_min_centroid: f32,
    pub electronic_min_mean_spread: f32,
    pub ambient_max_rolloff: f32,
    pub ambient_max_mean: f32,
    pub rock_min_std_spread: f32,
}

impl Default for GenreThresholds {
    fn default() -> Self {
        Self {
            electronic_min_centroid: 0.7,
            electronic_min_mean_spread: 2.0,
            ambient_max_rolloff: 0.5,
            ambient_max_mean: 0.0,
            rock_min_std_spread: 1.5,
        }
    }
}

/// Inputs to the genre rules
#[derive(Debug, Clone, Copy)]
pub struct GenreInputs {
    /// Mean spectral centroid (fraction of Nyquist)
    pub centroid: f32,
    /// Mean spectral rolloff (fraction of Nyquist)
    pub rolloff: f32,
    /// Mean of the MFCC mean vector
    pub mfcc_mean_avg: f32,
    /// Std of the MFCC mean vector
    pub mfcc_mean_spread: f32,
    /// Std of the MFCC std vector
    pub mfcc_std_spread: f32,
}

/// One (predicate, label) pair in the ordered rule table
pub struct GenreRule {
    pub label: GenreLabel,
    pub applies: fn(&GenreInputs, &GenreThresholds) -> bool,
}

fn is_electronic(f: &GenreInputs, t: &GenreThresholds) -> bool {
    f.centroid > t.electronic_min_centroid && f.mfcc_mean_spread > t.electronic_min_mean_spread
}

fn is_ambient(f: &GenreInputs, t: &GenreThresholds) -> bool {
    f.rolloff < t.ambient_max_rolloff && f.mfcc_mean_avg < t.ambient_max_mean
}

fn is_rock(f: &GenreInputs, t: &GenreThresholds) -> bool {
    f.mfcc_std_spread > t.rock_min_std_spread
}

fn always(_: &GenreInputs, _: &GenreThresholds) -> bool {
    true
}

/// Priority-ordered rule table; evaluation stops at the first match
pub const GENRE_RULES: &[GenreRule] = &[
    GenreRule {
        label: GenreLabel::Electronic,
        applies: is_electronic,
    },
    GenreRule {
        label: GenreLabel::Ambient,
        applies: is_ambient,
    },
    GenreRule {
        label: GenreLabel::Rock,
        applies: is_rock,
    },
    GenreRule {
        label: GenreLabel::Other,
        applies: always,
    },
];

/// Classify timbre and spectral statistics into a genre label
pub fn classify_genre(
    timbre: &TimbreStats,
    spectral: &SpectralMeans,
    thresholds: &GenreThresholds,
) -> GenreAnalysis {
    let inputs = GenreInputs {
        centroid: spectral.centroid,
        rolloff: spectral.rolloff,
        mfcc_mean_avg: timbre.mean_of_means(),
        mfcc_mean_spread: timbre.std_of_means(),
        mfcc_std_spread: timbre.std_of_stds(),
    };

    let genre = GENRE_RULES
        .iter()
        .find(|rule| (rule.applies)(&inputs, thresholds))
        .map(|rule| rule.label)
        .unwrap_or(GenreLabel::Other);

    GenreAnalysis {
        genre,
        confidence: timbre.mean_of_stds(),
        features: GenreFeatures {
            mfcc_mean: timbre.mean.clone(),
            mfcc_std: timbre.std.clone(),
            spectral_centroid: spectral.centroid,
            spectral_rolloff: spectral.rolloff,
        },
    }
}
