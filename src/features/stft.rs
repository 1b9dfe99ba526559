//! Short-time Fourier transform
//!
//! Hann-windowed magnitude spectrogram computed with rustfft. All downstream
//! spectral features (centroid, rolloff, contrast, MFCC, onset strength)
//! share one spectrogram per track.

use rustfft::{num_complex::Complex, FftPlanner};

/// STFT frame size in samples
pub const FRAME_SIZE: usize = 2048;

/// Hop between consecutive frames in samples
pub const HOP_SIZE: usize = 512;

/// Magnitude spectrogram
pub struct Stft {
    /// One magnitude vector per frame, `FRAME_SIZE / 2 + 1` bins each
    pub frames: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl Stft {
    /// Compute the magnitude spectrogram of a mono signal.
    ///
    /// Input shorter than one frame produces an empty spectrogram rather
    /// than an error; every consumer treats zero frames as a defined case.
    pub fn compute(samples: &[f32], sample_rate: u32) -> Self {
        if samples.len() < FRAME_SIZE {
            return Self {
                frames: Vec::new(),
                sample_rate,
            };
        }

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(FRAME_SIZE);

        let window: Vec<f32> = (0..FRAME_SIZE)
            .map(|i| {
                let x = i as f32 / (FRAME_SIZE - 1) as f32;
                0.5 - 0.5 * (2.0 * std::f32::consts::PI * x).cos()
            })
            .collect();

        let num_bins = FRAME_SIZE / 2 + 1;
        let num_frames = (samples.len() - FRAME_SIZE) / HOP_SIZE + 1;
        let mut frames = Vec::with_capacity(num_frames);
        let mut buffer = vec![Complex::new(0.0f32, 0.0f32); FRAME_SIZE];

        for frame_idx in 0..num_frames {
            let start = frame_idx * HOP_SIZE;
            for (i, b) in buffer.iter_mut().enumerate() {
                *b = Complex::new(samples[start + i] * window[i], 0.0);
            }
            fft.process(&mut buffer);

            let magnitudes: Vec<f32> = buffer[..num_bins].iter().map(|c| c.norm()).collect();
            frames.push(magnitudes);
        }

        Self {
            frames,
            sample_rate,
        }
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Center frequency of a bin in Hz
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / FRAME_SIZE as f32
    }

    /// Frames per second of the spectrogram
    pub fn frame_rate(&self) -> f32 {
        self.sample_rate as f32 / HOP_SIZE as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_yields_empty_spectrogram() {
        let stft = Stft::compute(&[0.1; 100], 44100);
        assert!(stft.is_empty());
    }

    #[test]
    fn test_frame_count() {
        let samples = vec![0.0f32; FRAME_SIZE + 3 * HOP_SIZE];
        let stft = Stft::compute(&samples, 44100);
        assert_eq!(stft.len(), 4);
        assert_eq!(stft.frames[0].len(), FRAME_SIZE / 2 + 1);
    }

    #[test]
    fn test_sine_peak_lands_in_expected_bin() {
        let sr = 44100u32;
        let freq = 440.0f32;
        let samples: Vec<f32> = (0..sr as usize)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sr as f32).sin())
            .collect();

        let stft = Stft::compute(&samples, sr);
        let frame = &stft.frames[stft.len() / 2];
        let peak_bin = frame
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();

        let peak_freq = stft.bin_frequency(peak_bin);
        assert!(
            (peak_freq - freq).abs() < 30.0,
            "peak at {} Hz, expected ~{} Hz",
            peak_freq,
            freq
        );
    }
}
