use audet::decode::decode_to_mono;
use audet::export::{collect_audio_files, process_folder, save_results};
use audet::{AnalyzerConfig, TrackAnalyzer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a minimal 16-bit PCM mono WAV file
fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) {
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for &s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }

    fs::write(path, bytes).expect("Failed to write test WAV");
}

fn sine(freq: f32, secs: f32, sample_rate: u32) -> Vec<i16> {
    let n = (secs * sample_rate as f32) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            ((t * freq * 2.0 * std::f32::consts::PI).sin() * 0.5 * i16::MAX as f32) as i16
        })
        .collect()
}

#[test]
fn test_decode_wav_to_mono() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tone.wav");
    write_wav(&path, &sine(440.0, 2.0, 44100), 44100);

    let audio = decode_to_mono(&path).expect("WAV should decode");
    assert_eq!(audio.sample_rate, 44100);
    // Sample count matches the written length (codec may pad slightly)
    assert!((audio.samples.len() as i64 - 88200).unsigned_abs() < 4096);
    assert!((audio.duration_secs() - 2.0).abs() < 0.1);

    // The signal should actually carry energy
    let peak = audio.samples.iter().cloned().fold(0.0f32, f32::max);
    assert!(peak > 0.3);
}

#[test]
fn test_decode_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("noise.mp3");
    fs::write(&path, b"this is not an audio file at all").unwrap();

    assert!(decode_to_mono(&path).is_err());
}

#[test]
fn test_collect_filters_by_extension() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("track.mp3"), b"x").unwrap();
    fs::write(dir.path().join("track.flac"), b"x").unwrap();
    fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
    fs::write(dir.path().join("README.md"), b"x").unwrap();

    let files = collect_audio_files(dir.path());
    assert_eq!(files.len(), 2);
}

#[test]
fn test_batch_skips_unreadable_files_and_writes_outputs() {
    let dir = TempDir::new().unwrap();
    // Two files that look like audio but cannot be decoded
    fs::write(dir.path().join("broken1.mp3"), b"garbage").unwrap();
    fs::write(dir.path().join("broken2.flac"), b"garbage").unwrap();
    fs::write(dir.path().join("notes.txt"), b"not audio").unwrap();

    let analyzer = TrackAnalyzer::new(AnalyzerConfig::default().with_waveform(false));
    let results = process_folder(&analyzer, dir.path());

    // Failures are contained per file, never a panic or abort
    assert!(results.is_empty());

    save_results(dir.path(), &results).unwrap();
    assert!(dir.path().join("analysis.json").exists());
    assert!(dir.path().join("analysis.csv").exists());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("analysis.json")).unwrap())
            .unwrap();
    assert!(json.as_object().unwrap().is_empty());

    let csv = fs::read_to_string(dir.path().join("analysis.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "filename,tempo,key,camelot,confidence,primary_mood,genre,key_changes_count"
    );
    assert!(lines.next().is_none());
}
