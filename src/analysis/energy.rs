//! Segment energy profile
//!
//! The waveform is cut into fixed-length segments and each segment into
//! 2048-sample RMS frames. A segment reports the mean and peak frame RMS;
//! the aggregate is the mean and population variance of segment energies.
//! A trailing partial segment is dropped.

use crate::model::{EnergyLevels, EnergySegment};

/// RMS frame length in samples
const RMS_FRAME: usize = 2048;

/// Compute the per-segment energy profile of a mono waveform.
pub fn analyze_energy_levels(samples: &[f32], sample_rate: u32, segment_secs: f32) -> EnergyLevels {
    let segment_len = (segment_secs * sample_rate as f32) as usize;
    if segment_len == 0 || samples.len() < segment_len {
        return EnergyLevels {
            segments: Vec::new(),
            average_energy: 0.0,
            energy_variance: 0.0,
        };
    }

    let mut segments = Vec::with_capacity(samples.len() / segment_len);

    for (i, segment) in samples.chunks_exact(segment_len).enumerate() {
        let mut frame_rms = Vec::with_capacity(segment.len() / RMS_FRAME + 1);
        for frame in segment.chunks(RMS_FRAME) {
            let mean_sq = frame.iter().map(|&s| s * s).sum::<f32>() / frame.len() as f32;
            frame_rms.push(mean_sq.sqrt());
        }

        let energy = frame_rms.iter().sum::<f32>() / frame_rms.len() as f32;
        let peak = frame_rms.iter().cloned().fold(0.0f32, f32::max);

        segments.push(EnergySegment {
            time: i as f32 * segment_secs,
            energy,
            peak,
        });
    }

    let average_energy = segments.iter().map(|s| s.energy).sum::<f32>() / segments.len() as f32;
    let energy_variance = segments
        .iter()
        .map(|s| (s.energy - average_energy) * (s.energy - average_energy))
        .sum::<f32>()
        / segments.len() as f32;

    EnergyLevels {
        segments,
        average_energy,
        energy_variance,
    }
}
