//! Folder batch analysis
//!
//! Walks a folder recursively, analyzes every supported audio file, and
//! writes the aggregate `analysis.json` and `analysis.csv` at the folder
//! root. A failure on one file is logged and skipped; the batch itself only
//! fails on output I/O.

use crate::analysis::TrackAnalyzer;
use crate::mix::AnalyzedTrack;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as audio input, lowercase
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a"];

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect supported audio files under `folder`, recursively, sorted by path.
pub fn collect_audio_files(folder: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_audio_file(path))
        .collect();
    files.sort();
    files
}

/// Analyze every audio file under `folder`.
///
/// Per-file failures are logged with the filename and skipped.
pub fn process_folder(analyzer: &TrackAnalyzer, folder: &Path) -> Vec<AnalyzedTrack> {
    let files = collect_audio_files(folder);
    log::info!("Found {} audio files in {}", files.len(), folder.display());

    let mut results = Vec::with_capacity(files.len());

    for (i, path) in files.iter().enumerate() {
        log::info!("[{}/{}] {}", i + 1, files.len(), path.display());
        match analyzer.analyze_file(path) {
            Ok(analysis) => results.push(AnalyzedTrack {
                path: path.clone(),
                analysis,
            }),
            Err(e) => {
                log::error!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    log::info!(
        "Analyzed {} of {} files",
        results.len(),
        files.len()
    );
    results
}

/// Write `analysis.json` and `analysis.csv` at the folder root.
///
/// The JSON file maps each filename to its full analysis; the CSV carries a
/// flat summary row per track.
pub fn save_results(folder: &Path, results: &[AnalyzedTrack]) -> Result<()> {
    let json_path = folder.join("analysis.json");
    let by_name: BTreeMap<&str, &crate::model::TrackAnalysis> = results
        .iter()
        .map(|t| (t.analysis.filename.as_str(), &t.analysis))
        .collect();
    let json = serde_json::to_string_pretty(&by_name)
        .context("Failed to serialize analysis results")?;
    fs::write(&json_path, json)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;
    log::info!("Wrote {}", json_path.display());

    let csv_path = folder.join("analysis.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;
    writer.write_record([
        "filename",
        "tempo",
        "key",
        "camelot",
        "confidence",
        "primary_mood",
        "genre",
        "key_changes_count",
    ])?;
    for track in results {
        let a = &track.analysis;
        writer.write_record([
            a.filename.as_str(),
            &format!("{:.2}", a.tempo),
            a.key.as_str(),
            &a.camelot.to_string(),
            &format!("{:.3}", a.confidence),
            a.mood.primary_mood.as_str(),
            a.genre.genre.as_str(),
            &a.key_changes.len().to_string(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    log::info!("Wrote {}", csv_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        assert!(is_audio_file(Path::new("a.mp3")));
        assert!(is_audio_file(Path::new("a.MP3")));
        assert!(is_audio_file(Path::new("a.FlAc")));
        assert!(is_audio_file(Path::new("a.m4a")));
        assert!(!is_audio_file(Path::new("a.txt")));
        assert!(!is_audio_file(Path::new("a.aiff")));
        assert!(!is_audio_file(Path::new("noextension")));
    }

    #[test]
    fn test_collect_skips_non_audio_and_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("a.mp3"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(sub.join("b.WAV"), b"x").unwrap();

        let files = collect_audio_files(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.mp3"));
        assert!(files[1].ends_with("b.WAV"));
    }

    #[test]
    fn test_save_results_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        save_results(dir.path(), &[]).unwrap();

        assert!(dir.path().join("analysis.json").exists());
        let csv = fs::read_to_string(dir.path().join("analysis.csv")).unwrap();
        assert!(csv.starts_with("filename,tempo,key,camelot"));
    }
}
