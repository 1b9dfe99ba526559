//! Spectral summary features
//!
//! Per-frame centroid, rolloff, and contrast, averaged across the track.
//! All three are normalized to [0, 1] so the classifier thresholds are
//! sample-rate independent: centroid and rolloff as a fraction of Nyquist,
//! contrast as a peak/valley ratio per octave band.

use super::stft::Stft;

/// Octave band edges in Hz for spectral contrast (upper edge is Nyquist)
const CONTRAST_BAND_EDGES: [f32; 7] = [0.0, 100.0, 200.0, 400.0, 800.0, 1600.0, 3200.0];

/// Track-level spectral means
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralMeans {
    /// Mean spectral centroid as a fraction of Nyquist
    pub centroid: f32,
    /// Mean 85%-energy rolloff as a fraction of Nyquist
    pub rolloff: f32,
    /// Mean per-octave-band peak/valley contrast
    pub contrast: f32,
}

/// Compute mean centroid, rolloff, and contrast over all frames.
///
/// An empty spectrogram (silent or too-short input) yields all zeros.
pub fn spectral_means(stft: &Stft) -> SpectralMeans {
    if stft.is_empty() {
        return SpectralMeans::default();
    }

    let num_bins = stft.frames[0].len();
    let nyquist = stft.sample_rate as f32 / 2.0;

    // Precompute contrast band boundaries as bin indices
    let mut band_bins: Vec<usize> = CONTRAST_BAND_EDGES
        .iter()
        .map(|&hz| ((hz / nyquist) * (num_bins - 1) as f32) as usize)
        .collect();
    band_bins.push(num_bins);

    let mut centroid_sum = 0.0f64;
    let mut rolloff_sum = 0.0f64;
    let mut contrast_sum = 0.0f64;

    for frame in &stft.frames {
        centroid_sum += frame_centroid(frame) as f64;
        rolloff_sum += frame_rolloff(frame) as f64;
        contrast_sum += frame_contrast(frame, &band_bins) as f64;
    }

    let n = stft.len() as f64;
    SpectralMeans {
        centroid: (centroid_sum / n) as f32,
        rolloff: (rolloff_sum / n) as f32,
        contrast: (contrast_sum / n) as f32,
    }
}

/// Magnitude-weighted mean bin position, as a fraction of Nyquist
fn frame_centroid(magnitudes: &[f32]) -> f32 {
    let mut weighted = 0.0f64;
    let mut total = 0.0f64;
    for (bin, &mag) in magnitudes.iter().enumerate() {
        weighted += bin as f64 * mag as f64;
        total += mag as f64;
    }
    if total <= 0.0 {
        return 0.0;
    }
    (weighted / total / (magnitudes.len() - 1) as f64) as f32
}

/// Bin below which 85% of spectral energy lies, as a fraction of Nyquist
fn frame_rolloff(magnitudes: &[f32]) -> f32 {
    let total_energy: f64 = magnitudes.iter().map(|&m| (m as f64) * (m as f64)).sum();
    if total_energy <= 0.0 {
        return 0.0;
    }

    let threshold = total_energy * 0.85;
    let mut cumulative = 0.0f64;
    for (bin, &mag) in magnitudes.iter().enumerate() {
        cumulative += (mag as f64) * (mag as f64);
        if cumulative >= threshold {
            return bin as f32 / (magnitudes.len() - 1) as f32;
        }
    }
    1.0
}

/// Mean peak/valley contrast across octave bands, in [0, 1]
fn frame_contrast(magnitudes: &[f32], band_bins: &[usize]) -> f32 {
    let mut sum = 0.0f32;
    let mut bands = 0usize;

    for window in band_bins.windows(2) {
        let (lo, hi) = (window[0], window[1]);
        if hi <= lo {
            continue;
        }
        let band = &magnitudes[lo..hi];
        let peak = band.iter().cloned().fold(0.0f32, f32::max);
        let valley = band.iter().cloned().fold(f32::INFINITY, f32::min);
        if peak > 0.0 {
            sum += (peak - valley) / peak;
        }
        bands += 1;
    }

    if bands == 0 {
        0.0
    } else {
        sum / bands as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stft::Stft;

    fn sine(freq: f32, secs: f32, sr: u32) -> Vec<f32> {
        (0..(secs * sr as f32) as usize)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sr as f32).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_silence_gives_zero_means() {
        let stft = Stft::compute(&vec![0.0f32; 44100], 44100);
        let means = spectral_means(&stft);
        assert_eq!(means.centroid, 0.0);
        assert_eq!(means.rolloff, 0.0);
        assert_eq!(means.contrast, 0.0);
    }

    #[test]
    fn test_empty_spectrogram_gives_zero_means() {
        let stft = Stft::compute(&[], 44100);
        let means = spectral_means(&stft);
        assert_eq!(means.centroid, 0.0);
    }

    #[test]
    fn test_higher_frequency_raises_centroid() {
        let low = spectral_means(&Stft::compute(&sine(200.0, 1.0, 44100), 44100));
        let high = spectral_means(&Stft::compute(&sine(8000.0, 1.0, 44100), 44100));
        assert!(high.centroid > low.centroid);
        assert!(high.rolloff > low.rolloff);
    }

    #[test]
    fn test_values_stay_in_unit_range() {
        let means = spectral_means(&Stft::compute(&sine(1000.0, 2.0, 44100), 44100));
        assert!((0.0..=1.0).contains(&means.centroid));
        assert!((0.0..=1.0).contains(&means.rolloff));
        assert!((0.0..=1.0).contains(&means.contrast));
    }
}
