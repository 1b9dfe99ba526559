//! Tempo and key detection via stratum-dsp
//!
//! One call to stratum-dsp's chroma-based analysis yields BPM, key, key
//! confidence, and the beat grid. The detected BPM is normalized into the
//! configured range by octave doubling/halving.

use crate::camelot::{key_name, Camelot};
use crate::error::AnalysisError;
use stratum_dsp::{analyze_audio, AnalysisConfig};

/// Result of one engine pass over a sample buffer
#[derive(Debug, Clone)]
pub struct EngineResult {
    /// Detected BPM, normalized into the configured range
    pub bpm: f32,
    /// Detected key as `"<note> <major|minor>"`
    pub key: String,
    /// Camelot code for the detected key
    pub camelot: Camelot,
    /// Key detection confidence (0-1)
    pub key_confidence: f32,
    /// Beat positions in seconds
    pub beats: Vec<f32>,
}

/// Analyze a mono sample buffer for tempo, key, and beats.
///
/// Buffers shorter than one second are rejected; the engine cannot produce
/// a meaningful estimate from them.
pub fn analyze_samples(
    samples: &[f32],
    sample_rate: u32,
    min_bpm: f32,
    max_bpm: f32,
) -> Result<EngineResult, AnalysisError> {
    if samples.len() < sample_rate as usize {
        return Err(AnalysisError::TooShort {
            samples: samples.len(),
        });
    }

    let config = AnalysisConfig::default();
    let result = analyze_audio(samples, sample_rate, config)
        .map_err(|e| AnalysisError::Engine(format!("{:?}", e)))?;

    // Normalize BPM into range: double if below minimum, halve if above maximum
    let mut bpm = result.bpm;
    if min_bpm > 0.0 && max_bpm > 0.0 && bpm > 0.0 {
        while bpm < min_bpm && bpm * 2.0 <= max_bpm {
            bpm *= 2.0;
            log::debug!("BPM doubled to {:.1} (was below minimum {})", bpm, min_bpm);
        }
        while bpm > max_bpm && bpm / 2.0 >= min_bpm {
            bpm /= 2.0;
            log::debug!("BPM halved to {:.1} (was above maximum {})", bpm, max_bpm);
        }
    }

    let key = key_name(&result.key);
    let camelot = Camelot::from_key(&result.key);

    log::debug!(
        "Engine analysis: BPM={:.1}, key={} ({}), {} beats",
        bpm,
        key,
        camelot,
        result.beat_grid.beats.len()
    );

    Ok(EngineResult {
        bpm,
        key,
        camelot,
        key_confidence: result.key_confidence,
        beats: result.beat_grid.beats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short_input_is_rejected() {
        let result = analyze_samples(&[0.0; 1000], 44100, 70.0, 170.0);
        assert!(matches!(result, Err(AnalysisError::TooShort { .. })));
    }
}
