//! Full-track analysis aggregator

use super::beat_grid::analyze_beat_grid;
use super::energy::analyze_energy_levels;
use super::engine::analyze_samples;
use super::genre::{classify_genre, GenreThresholds};
use super::key_changes::detect_key_changes;
use super::mood::{estimate_mood, MoodThresholds};
use super::waveform::render_waveform_png;
use crate::decode::decode_to_mono;
use crate::error::AnalysisError;
use crate::features::{mfcc_stats, onset_envelope, rhythm_stability, spectral_means, Stft};
use crate::model::{MoodFeatures, TrackAnalysis};
use std::path::{Path, PathBuf};

/// Tunable parameters for a full track analysis
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Lower bound of the reported BPM range
    pub min_bpm: f32,
    /// Upper bound of the reported BPM range
    pub max_bpm: f32,
    /// Sliding window length for key change detection, seconds
    pub key_window_secs: f32,
    /// Hop between key windows, seconds
    pub key_hop_secs: f32,
    /// Energy segment length, seconds
    pub energy_segment_secs: f32,
    /// Max inter-beat interval std for a grid to count as quantized, seconds
    pub quantized_ibi_std_max: f32,
    /// Write a `<file>_waveform.png` next to each analyzed file
    pub write_waveform: bool,
    pub mood: MoodThresholds,
    pub genre: GenreThresholds,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_bpm: 70.0,
            max_bpm: 170.0,
            key_window_secs: 4.0,
            key_hop_secs: 2.0,
            energy_segment_secs: 1.0,
            quantized_ibi_std_max: 0.1,
            write_waveform: true,
            mood: MoodThresholds::default(),
            genre: GenreThresholds::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_bpm_range(mut self, min: f32, max: f32) -> Self {
        self.min_bpm = min;
        self.max_bpm = max;
        self
    }

    pub fn with_waveform(mut self, write: bool) -> Self {
        self.write_waveform = write;
        self
    }
}

/// Runs the complete per-track pipeline: decode, engine analysis, feature
/// extraction, heuristic classification, and artifact output.
pub struct TrackAnalyzer {
    config: AnalyzerConfig,
}

impl TrackAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one audio file into a complete result.
    ///
    /// Decoding or engine failure aborts the analysis; a failed waveform
    /// write only logs a warning, since the analysis itself is already
    /// complete at that point.
    pub fn analyze_file(&self, path: &Path) -> Result<TrackAnalysis, AnalysisError> {
        let cfg = &self.config;
        log::info!("Analyzing {}", path.display());

        let audio = decode_to_mono(path)?;
        log::debug!(
            "Decoded {:.1}s at {} Hz",
            audio.duration_secs(),
            audio.sample_rate
        );

        let engine = analyze_samples(&audio.samples, audio.sample_rate, cfg.min_bpm, cfg.max_bpm)?;

        let stft = Stft::compute(&audio.samples, audio.sample_rate);
        let spectral = spectral_means(&stft);
        let timbre = mfcc_stats(&stft);
        let envelope = onset_envelope(&stft);
        let stability = rhythm_stability(&envelope, stft.frame_rate());

        let key_changes = detect_key_changes(
            &audio,
            cfg.key_window_secs,
            cfg.key_hop_secs,
            cfg.min_bpm,
            cfg.max_bpm,
        );

        let energy_levels =
            analyze_energy_levels(&audio.samples, audio.sample_rate, cfg.energy_segment_secs);

        let mood = estimate_mood(
            MoodFeatures {
                tempo: engine.bpm,
                energy: spectral.centroid,
                brightness: spectral.rolloff,
                contrast: spectral.contrast,
                rhythm_stability: stability,
            },
            &cfg.mood,
        );

        let genre = classify_genre(&timbre, &spectral, &cfg.genre);

        let beat_grid = analyze_beat_grid(
            engine.bpm,
            engine.beats,
            &envelope,
            stft.frame_rate(),
            cfg.quantized_ibi_std_max,
        );

        if cfg.write_waveform {
            let waveform_path = waveform_path_for(path);
            if let Err(e) = render_waveform_png(&audio.samples, &waveform_path) {
                log::warn!("Could not write waveform image: {}", e);
            }
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let analysis = TrackAnalysis {
            filename,
            tempo: engine.bpm,
            key: engine.key,
            harmonic_matches: engine.camelot.harmonic_matches(),
            camelot: engine.camelot,
            confidence: engine.key_confidence,
            key_changes,
            mood,
            beat_grid,
            energy_levels,
            genre,
            analysis_time: chrono::Local::now().to_rfc3339(),
        };

        log::info!(
            "{}: {:.1} BPM, {} ({}), mood {}, genre {}",
            analysis.filename,
            analysis.tempo,
            analysis.key,
            analysis.camelot,
            analysis.mood.primary_mood,
            analysis.genre.genre
        );

        Ok(analysis)
    }
}

/// Waveform artifact path: the input path with `_waveform.png` appended
pub fn waveform_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}_waveform.png", path.display()))
}
