//! Beat grid assembly
//!
//! Combines the engine's beat timestamps with the onset envelope into a
//! per-beat strength list and a quantization flag. A track counts as
//! quantized when its inter-beat intervals barely vary, which is typical of
//! sequenced material.

use crate::features::strength_at_beats;
use crate::model::BeatGrid;

/// Build the beat grid from engine beats and the onset envelope.
///
/// `quantized_ibi_std_max` is the maximum standard deviation of inter-beat
/// intervals, in seconds, for the grid to count as quantized. Fewer than two
/// beats never count as quantized.
pub fn analyze_beat_grid(
    tempo: f32,
    beat_times: Vec<f32>,
    envelope: &[f32],
    frame_rate: f32,
    quantized_ibi_std_max: f32,
) -> BeatGrid {
    let beat_strength = strength_at_beats(envelope, frame_rate, &beat_times);

    let is_quantized = if beat_times.len() >= 2 {
        let intervals: Vec<f32> = beat_times.windows(2).map(|p| p[1] - p[0]).collect();
        let mean = intervals.iter().sum::<f32>() / intervals.len() as f32;
        let var = intervals
            .iter()
            .map(|&d| (d - mean) * (d - mean))
            .sum::<f32>()
            / intervals.len() as f32;
        var.sqrt() < quantized_ibi_std_max
    } else {
        false
    };

    BeatGrid {
        tempo,
        beat_times,
        beat_strength,
        is_quantized,
    }
}
