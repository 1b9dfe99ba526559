//! Waveform image rendering
//!
//! Renders a fixed-size overview PNG of the waveform: one column per pixel,
//! drawn from the column's minimum to its maximum sample value around the
//! vertical midline.

use crate::error::AnalysisError;
use image::{Rgb, RgbImage};
use std::path::Path;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 400;

const BACKGROUND: Rgb<u8> = Rgb([250, 250, 250]);
const MIDLINE: Rgb<u8> = Rgb([210, 210, 210]);
const WAVE: Rgb<u8> = Rgb([30, 100, 200]);

/// Render the waveform overview to a PNG file.
///
/// Each pixel column covers an equal share of the samples and is drawn as a
/// vertical bar from the column minimum to the column maximum. Silence draws
/// only the midline.
pub fn render_waveform_png(samples: &[f32], path: &Path) -> Result<(), AnalysisError> {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    let mid = HEIGHT / 2;
    for x in 0..WIDTH {
        img.put_pixel(x, mid, MIDLINE);
    }

    if !samples.is_empty() {
        let per_column = (samples.len() as f32 / WIDTH as f32).max(1.0);
        let half = (HEIGHT / 2) as f32 - 1.0;

        for x in 0..WIDTH {
            let start = (x as f32 * per_column) as usize;
            let end = (((x + 1) as f32 * per_column) as usize).min(samples.len());
            if start >= end {
                continue;
            }

            let mut min = f32::MAX;
            let mut max = f32::MIN;
            for &s in &samples[start..end] {
                min = min.min(s);
                max = max.max(s);
            }

            let top = mid as i32 - (max.clamp(-1.0, 1.0) * half) as i32;
            let bottom = mid as i32 - (min.clamp(-1.0, 1.0) * half) as i32;
            for y in top.max(0)..=bottom.min(HEIGHT as i32 - 1) {
                img.put_pixel(x, y as u32, WAVE);
            }
        }
    }

    img.save(path).map_err(|e| AnalysisError::Artifact {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::debug!("Waveform image written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_png_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.png");

        let samples: Vec<f32> = (0..44100)
            .map(|i| (i as f32 * 0.05).sin() * 0.8)
            .collect();
        render_waveform_png(&samples, &path).unwrap();

        assert!(path.exists());
        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), WIDTH);
        assert_eq!(img.height(), HEIGHT);
    }

    #[test]
    fn test_empty_samples_still_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        render_waveform_png(&[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let path = Path::new("/nonexistent-dir/wave.png");
        let result = render_waveform_png(&[0.0; 100], path);
        assert!(matches!(result, Err(AnalysisError::Artifact { .. })));
    }
}
