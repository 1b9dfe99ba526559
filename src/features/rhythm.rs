//! Rhythm features
//!
//! Onset strength envelope (half-wave rectified spectral flux) and a
//! tempogram-derived rhythm stability statistic. The envelope is also
//! sampled at beat positions for per-beat strength.

use super::stft::Stft;

/// Tempogram window length in envelope frames (~4.5 s at 86 fps)
const TEMPOGRAM_WINDOW: usize = 384;

/// Hop between tempogram windows in envelope frames
const TEMPOGRAM_HOP: usize = 16;

/// BPM range the tempogram lag axis covers
const TEMPOGRAM_MIN_BPM: f32 = 30.0;
const TEMPOGRAM_MAX_BPM: f32 = 300.0;

/// Onset strength envelope: per-frame half-wave rectified spectral flux,
/// normalized so the strongest onset is 1.0.
///
/// Returns one value per spectrogram frame; empty input yields an empty
/// envelope.
pub fn onset_envelope(stft: &Stft) -> Vec<f32> {
    if stft.len() < 2 {
        return vec![0.0; stft.len()];
    }

    let mut envelope = Vec::with_capacity(stft.len());
    envelope.push(0.0);

    for pair in stft.frames.windows(2) {
        let flux: f32 = pair[0]
            .iter()
            .zip(pair[1].iter())
            .map(|(&prev, &cur)| (cur - prev).max(0.0))
            .sum();
        envelope.push(flux);
    }

    let max = envelope.iter().cloned().fold(0.0f32, f32::max);
    if max > 0.0 {
        for v in &mut envelope {
            *v /= max;
        }
    }

    envelope
}

/// Rhythm stability: standard deviation of a windowed autocorrelation
/// tempogram of the onset envelope.
///
/// Each window of the envelope is autocorrelated over the lag range
/// corresponding to 30-300 BPM and normalized by the zero lag; the statistic
/// is the standard deviation of all tempogram cells. Steady rhythms produce
/// a consistent lag profile across windows and thus lower spread than
/// erratic ones. Envelopes shorter than one window yield 0.
pub fn rhythm_stability(envelope: &[f32], frame_rate: f32) -> f32 {
    if envelope.len() < TEMPOGRAM_WINDOW || frame_rate <= 0.0 {
        return 0.0;
    }

    let min_lag = ((60.0 / TEMPOGRAM_MAX_BPM) * frame_rate).round() as usize;
    let max_lag = (((60.0 / TEMPOGRAM_MIN_BPM) * frame_rate).round() as usize)
        .min(TEMPOGRAM_WINDOW - 1);
    if min_lag == 0 || min_lag >= max_lag {
        return 0.0;
    }

    let mut cells: Vec<f32> = Vec::new();

    let mut start = 0;
    while start + TEMPOGRAM_WINDOW <= envelope.len() {
        let window = &envelope[start..start + TEMPOGRAM_WINDOW];
        let zero_lag: f32 = window.iter().map(|&v| v * v).sum();

        for lag in min_lag..=max_lag {
            let corr: f32 = window[lag..]
                .iter()
                .zip(window.iter())
                .map(|(&a, &b)| a * b)
                .sum();
            cells.push(if zero_lag > 0.0 { corr / zero_lag } else { 0.0 });
        }

        start += TEMPOGRAM_HOP;
    }

    if cells.is_empty() {
        return 0.0;
    }

    let mean = cells.iter().sum::<f32>() / cells.len() as f32;
    let var = cells.iter().map(|&v| (v - mean) * (v - mean)).sum::<f32>() / cells.len() as f32;
    var.sqrt()
}

/// Sample the onset envelope at beat timestamps, max-normalized.
///
/// Beats falling outside the envelope clamp to the last frame. Returns one
/// strength per beat; an empty envelope yields zeros.
pub fn strength_at_beats(envelope: &[f32], frame_rate: f32, beat_times: &[f32]) -> Vec<f32> {
    if envelope.is_empty() || beat_times.is_empty() {
        return vec![0.0; beat_times.len()];
    }

    let mut strengths: Vec<f32> = beat_times
        .iter()
        .map(|&t| {
            let idx = ((t * frame_rate) as usize).min(envelope.len() - 1);
            envelope[idx]
        })
        .collect();

    let max = strengths.iter().cloned().fold(0.0f32, f32::max);
    if max > 0.0 {
        for s in &mut strengths {
            *s /= max;
        }
    }

    strengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stft::Stft;

    /// Clicks at a fixed interval over a quiet noise floor
    fn click_track(interval_secs: f32, secs: f32, sr: u32) -> Vec<f32> {
        let n = (secs * sr as f32) as usize;
        let interval = (interval_secs * sr as f32) as usize;
        let mut samples = vec![0.0f32; n];
        let mut i = 0;
        while i < n {
            for j in i..(i + 256).min(n) {
                samples[j] = if (j - i) % 2 == 0 { 0.9 } else { -0.9 };
            }
            i += interval;
        }
        samples
    }

    #[test]
    fn test_silence_has_flat_envelope() {
        let stft = Stft::compute(&vec![0.0f32; 44100], 44100);
        let env = onset_envelope(&stft);
        assert!(env.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_input_handled() {
        let stft = Stft::compute(&[], 44100);
        assert!(onset_envelope(&stft).is_empty());
        assert_eq!(rhythm_stability(&[], 86.0), 0.0);
        assert_eq!(strength_at_beats(&[], 86.0, &[0.5, 1.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_clicks_produce_onsets() {
        let stft = Stft::compute(&click_track(0.5, 4.0, 44100), 44100);
        let env = onset_envelope(&stft);
        let peak = env.iter().cloned().fold(0.0f32, f32::max);
        assert!((peak - 1.0).abs() < 1e-6, "envelope should be max-normalized");
        assert!(env.iter().filter(|&&v| v > 0.5).count() >= 4);
    }

    #[test]
    fn test_beat_strengths_are_normalized() {
        let stft = Stft::compute(&click_track(0.5, 4.0, 44100), 44100);
        let env = onset_envelope(&stft);
        let strengths = strength_at_beats(&env, stft.frame_rate(), &[0.0, 0.5, 1.0, 1.5]);
        assert_eq!(strengths.len(), 4);
        assert!(strengths.iter().all(|&s| (0.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_short_envelope_stability_is_zero() {
        assert_eq!(rhythm_stability(&vec![0.5; 100], 86.0), 0.0);
    }

    #[test]
    fn test_stability_is_finite_for_rhythmic_input() {
        let stft = Stft::compute(&click_track(0.5, 10.0, 44100), 44100);
        let env = onset_envelope(&stft);
        let stability = rhythm_stability(&env, stft.frame_rate());
        assert!(stability.is_finite());
        assert!(stability >= 0.0);
    }
}
