use crate::camelot::Camelot;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Complete analysis result for one track
///
/// Produced once per analyzed file by the aggregator; never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct TrackAnalysis {
    /// Base name of the analyzed file
    pub filename: String,

    /// Global tempo estimate in BPM
    pub tempo: f32,

    /// Detected key as `"<note> <major|minor>"`, or `"Unknown"`
    pub key: String,

    /// Camelot wheel code for the detected key
    pub camelot: Camelot,

    /// Key detection confidence (0-1)
    pub confidence: f32,

    /// Harmonically compatible Camelot codes (empty when the key is unknown)
    pub harmonic_matches: Vec<Camelot>,

    /// Per-window key detections over time
    pub key_changes: Vec<KeyChange>,

    /// Mood label, score map, and raw feature snapshot
    pub mood: MoodAnalysis,

    /// Beat positions, strengths, and quantization flag
    pub beat_grid: BeatGrid,

    /// Per-segment and aggregate RMS energy
    pub energy_levels: EnergyLevels,

    /// Genre label with confidence and feature snapshot
    pub genre: GenreAnalysis,

    /// When the analysis ran (RFC 3339)
    pub analysis_time: String,
}

/// One sliding-window key detection
#[derive(Debug, Clone, Serialize)]
pub struct KeyChange {
    /// Window start in seconds from the beginning of the track
    pub time: f32,
    pub key: String,
    pub camelot: Camelot,
    pub confidence: f32,
}

/// Mood classification result
#[derive(Debug, Clone, Serialize)]
pub struct MoodAnalysis {
    /// Label chosen by the first matching rule
    pub primary_mood: MoodLabel,

    /// Independent per-label scores; computed from their own formulas and
    /// allowed to disagree with `primary_mood` (inherited behavior, kept
    /// as-is)
    pub mood_scores: MoodScores,

    /// Raw features the rules and scores were computed from
    pub features: MoodFeatures,
}

/// Mood categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Energetic,
    Calm,
    Dark,
    Sad,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 4] = [
        MoodLabel::Energetic,
        MoodLabel::Calm,
        MoodLabel::Dark,
        MoodLabel::Sad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Energetic => "energetic",
            MoodLabel::Calm => "calm",
            MoodLabel::Dark => "dark",
            MoodLabel::Sad => "sad",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "energetic" => Ok(MoodLabel::Energetic),
            "calm" => Ok(MoodLabel::Calm),
            "dark" => Ok(MoodLabel::Dark),
            "sad" => Ok(MoodLabel::Sad),
            other => Err(format!(
                "unknown mood '{}' (expected energetic, calm, dark, or sad)",
                other
            )),
        }
    }
}

/// Per-label mood scores, each clamped to [0, 1]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoodScores {
    pub energetic: f32,
    pub calm: f32,
    pub dark: f32,
    pub sad: f32,
}

impl MoodScores {
    pub fn get(&self, label: MoodLabel) -> f32 {
        match label {
            MoodLabel::Energetic => self.energetic,
            MoodLabel::Calm => self.calm,
            MoodLabel::Dark => self.dark,
            MoodLabel::Sad => self.sad,
        }
    }
}

/// Raw features behind the mood classification
///
/// `energy` is the mean spectral centroid and `brightness` the mean rolloff,
/// both as fractions of Nyquist; the field names follow the rule definitions
/// rather than the underlying spectral quantities.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoodFeatures {
    pub tempo: f32,
    pub energy: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub rhythm_stability: f32,
}

/// Beat grid for a track
#[derive(Debug, Clone, Serialize)]
pub struct BeatGrid {
    pub tempo: f32,

    /// Beat positions in seconds
    pub beat_times: Vec<f32>,

    /// Onset strength at each beat, max-normalized
    pub beat_strength: Vec<f32>,

    /// True when inter-beat intervals are nearly constant
    pub is_quantized: bool,
}

/// One fixed-length energy segment
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnergySegment {
    /// Segment start in seconds
    pub time: f32,
    /// Mean RMS over the segment
    pub energy: f32,
    /// Peak RMS frame within the segment
    pub peak: f32,
}

/// Per-segment and aggregate energy
#[derive(Debug, Clone, Serialize)]
pub struct EnergyLevels {
    pub segments: Vec<EnergySegment>,
    pub average_energy: f32,
    pub energy_variance: f32,
}

/// Genre classification result
#[derive(Debug, Clone, Serialize)]
pub struct GenreAnalysis {
    pub genre: GenreLabel,

    /// Mean of the MFCC std vector; a spread statistic, not a probability
    pub confidence: f32,

    pub features: GenreFeatures,
}

/// Genre categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreLabel {
    Electronic,
    Ambient,
    Rock,
    Other,
}

impl GenreLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenreLabel::Electronic => "electronic",
            GenreLabel::Ambient => "ambient",
            GenreLabel::Rock => "rock",
            GenreLabel::Other => "other",
        }
    }
}

impl fmt::Display for GenreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw features behind the genre classification
#[derive(Debug, Clone, Serialize)]
pub struct GenreFeatures {
    pub mfcc_mean: Vec<f32>,
    pub mfcc_std: Vec<f32>,
    pub spectral_centroid: f32,
    pub spectral_rolloff: f32,
}
