//! Time-varying key detection
//!
//! A fixed-size window slides over the waveform and the key engine runs on
//! each window independently. Every window is reported, even when identical
//! to its neighbor; there is no smoothing or change-point thresholding.

use super::engine::analyze_samples;
use crate::decode::MonoAudio;
use crate::model::KeyChange;

/// Run per-window key detection over the whole track.
///
/// Windows the engine rejects (e.g. silence) are logged and skipped. Input
/// shorter than one window yields an empty list.
pub fn detect_key_changes(
    audio: &MonoAudio,
    window_secs: f32,
    hop_secs: f32,
    min_bpm: f32,
    max_bpm: f32,
) -> Vec<KeyChange> {
    let sr = audio.sample_rate;
    let window = (window_secs * sr as f32) as usize;
    let hop = (hop_secs * sr as f32) as usize;

    if window == 0 || hop == 0 {
        return Vec::new();
    }

    let mut changes = Vec::new();
    let mut start = 0usize;

    while start + window < audio.samples.len() {
        let slice = &audio.samples[start..start + window];
        let time = start as f32 / sr as f32;

        match analyze_samples(slice, sr, min_bpm, max_bpm) {
            Ok(result) => changes.push(KeyChange {
                time,
                key: result.key,
                camelot: result.camelot,
                confidence: result.key_confidence,
            }),
            Err(e) => {
                log::debug!("Skipping key window at {:.1}s: {}", time, e);
            }
        }

        start += hop;
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_yields_no_changes() {
        // Less than one 4 s window
        let audio = MonoAudio {
            samples: vec![0.1; 44100],
            sample_rate: 44100,
        };
        let changes = detect_key_changes(&audio, 4.0, 2.0, 70.0, 170.0);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_exact_window_length_yields_no_changes() {
        // The window must fit strictly inside the waveform
        let audio = MonoAudio {
            samples: vec![0.1; 44100 * 4],
            sample_rate: 44100,
        };
        let changes = detect_key_changes(&audio, 4.0, 2.0, 70.0, 170.0);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_silent_windows_are_skipped_not_fatal() {
        let audio = MonoAudio {
            samples: vec![0.0; 44100 * 10],
            sample_rate: 44100,
        };
        // Whether the engine rejects silence per window or reports a weak
        // key, the pass itself must complete and report at most one record
        // per window position
        let changes = detect_key_changes(&audio, 4.0, 2.0, 70.0, 170.0);
        assert!(changes.len() <= 3);
    }
}
