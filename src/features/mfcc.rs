//! MFCC timbre features
//!
//! Spectrogram -> 40-filter mel bank -> log energies -> DCT-II -> 20
//! coefficients per frame, summarized as per-coefficient mean and standard
//! deviation across the track. The genre classifier consumes only these
//! summary statistics.

use super::stft::Stft;

/// Number of mel filters in the bank
const NUM_MEL_FILTERS: usize = 40;

/// Number of cepstral coefficients kept per frame
pub const NUM_COEFFICIENTS: usize = 20;

/// Per-coefficient mean and standard deviation across all frames
#[derive(Debug, Clone)]
pub struct TimbreStats {
    pub mean: Vec<f32>,
    pub std: Vec<f32>,
}

impl TimbreStats {
    fn zeros() -> Self {
        Self {
            mean: vec![0.0; NUM_COEFFICIENTS],
            std: vec![0.0; NUM_COEFFICIENTS],
        }
    }

    /// Mean of the per-coefficient means
    pub fn mean_of_means(&self) -> f32 {
        mean(&self.mean)
    }

    /// Standard deviation of the per-coefficient means
    pub fn std_of_means(&self) -> f32 {
        std_dev(&self.mean)
    }

    /// Mean of the per-coefficient standard deviations
    pub fn mean_of_stds(&self) -> f32 {
        mean(&self.std)
    }

    /// Standard deviation of the per-coefficient standard deviations
    pub fn std_of_stds(&self) -> f32 {
        std_dev(&self.std)
    }
}

fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Compute MFCC summary statistics for a spectrogram.
///
/// An empty spectrogram yields all-zero statistics.
pub fn mfcc_stats(stft: &Stft) -> TimbreStats {
    if stft.is_empty() {
        return TimbreStats::zeros();
    }

    let num_bins = stft.frames[0].len();
    let nyquist = stft.sample_rate as f32 / 2.0;

    // Triangular mel filterbank over 0..Nyquist
    let mel_max = hz_to_mel(nyquist);
    let centers: Vec<f32> = (0..NUM_MEL_FILTERS + 2)
        .map(|i| {
            let mel = mel_max * i as f32 / (NUM_MEL_FILTERS + 1) as f32;
            mel_to_hz(mel) / nyquist * (num_bins - 1) as f32
        })
        .collect();

    // DCT-II basis, coefficient-major
    let mut dct_basis = vec![vec![0.0f32; NUM_MEL_FILTERS]; NUM_COEFFICIENTS];
    for (k, row) in dct_basis.iter_mut().enumerate() {
        for (n, cell) in row.iter_mut().enumerate() {
            *cell = (std::f32::consts::PI * k as f32 * (n as f32 + 0.5)
                / NUM_MEL_FILTERS as f32)
                .cos();
        }
    }

    let num_frames = stft.len();
    let mut sums = vec![0.0f64; NUM_COEFFICIENTS];
    let mut sq_sums = vec![0.0f64; NUM_COEFFICIENTS];
    let mut mel_energies = vec![0.0f32; NUM_MEL_FILTERS];

    for frame in &stft.frames {
        for (f, energy) in mel_energies.iter_mut().enumerate() {
            *energy = apply_filter(frame, centers[f], centers[f + 1], centers[f + 2]);
        }

        for (k, basis) in dct_basis.iter().enumerate() {
            let coeff: f32 = mel_energies
                .iter()
                .zip(basis.iter())
                .map(|(&e, &b)| (e + 1e-10).ln() * b)
                .sum();
            sums[k] += coeff as f64;
            sq_sums[k] += (coeff as f64) * (coeff as f64);
        }
    }

    let n = num_frames as f64;
    let mean: Vec<f32> = sums.iter().map(|&s| (s / n) as f32).collect();
    let std: Vec<f32> = sums
        .iter()
        .zip(sq_sums.iter())
        .map(|(&s, &sq)| {
            let m = s / n;
            ((sq / n - m * m).max(0.0)).sqrt() as f32
        })
        .collect();

    TimbreStats { mean, std }
}

/// Triangular filter response summed over the spectrum
fn apply_filter(magnitudes: &[f32], left: f32, center: f32, right: f32) -> f32 {
    let lo = left.floor().max(0.0) as usize;
    let hi = (right.ceil() as usize).min(magnitudes.len() - 1);
    let mut energy = 0.0f32;

    for (bin, &mag) in magnitudes.iter().enumerate().take(hi + 1).skip(lo) {
        let pos = bin as f32;
        let weight = if pos <= center {
            if center > left { (pos - left) / (center - left) } else { 0.0 }
        } else if right > center {
            (right - pos) / (right - center)
        } else {
            0.0
        };
        if weight > 0.0 {
            energy += mag * mag * weight;
        }
    }

    energy
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

fn std_dev(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|&v| (v - m) * (v - m)).sum::<f32>() / values.len() as f32;
    var.sqrt()
}
