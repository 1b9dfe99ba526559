//! Per-track report export
//!
//! Writes either a pretty-JSON sidecar or a self-contained HTML report next
//! to the analyzed file. The HTML page embeds the chart data as JSON blobs
//! and draws them with Plotly from its CDN: key changes over time, the mood
//! score radar, and the energy profile.

use crate::model::TrackAnalysis;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Html,
    Json,
}

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Analysis report: __FILENAME__</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
body { font-family: sans-serif; margin: 2em auto; max-width: 900px; color: #222; }
h1 { font-size: 1.4em; }
table.summary { border-collapse: collapse; margin-bottom: 2em; }
table.summary td { border: 1px solid #ccc; padding: 0.4em 0.8em; }
div.chart { height: 360px; margin-bottom: 2em; }
</style>
</head>
<body>
<h1>__FILENAME__</h1>
<table class="summary">
<tr><td>Tempo</td><td>__TEMPO__ BPM</td></tr>
<tr><td>Key</td><td>__KEY__ (__CAMELOT__, confidence __CONFIDENCE__)</td></tr>
<tr><td>Mood</td><td>__MOOD__</td></tr>
<tr><td>Genre</td><td>__GENRE__</td></tr>
<tr><td>Key changes</td><td>__KEY_CHANGE_COUNT__ windows</td></tr>
</table>
<div id="keys" class="chart"></div>
<div id="mood" class="chart"></div>
<div id="energy" class="chart"></div>
<script>
var keyTimes = __KEY_TIMES__;
var keyConfidence = __KEY_CONFIDENCE__;
var keyLabels = __KEY_LABELS__;
Plotly.newPlot('keys', [{
  x: keyTimes, y: keyConfidence, text: keyLabels,
  mode: 'markers+lines', hovertemplate: '%{text}<br>%{x:.1f}s<extra></extra>'
}], { title: 'Key over time', xaxis: { title: 'seconds' }, yaxis: { title: 'confidence', range: [0, 1] } });

var moodScores = __MOOD_SCORES__;
Plotly.newPlot('mood', [{
  type: 'scatterpolar', fill: 'toself',
  theta: ['energetic', 'calm', 'dark', 'sad', 'energetic'],
  r: [moodScores.energetic, moodScores.calm, moodScores.dark, moodScores.sad, moodScores.energetic]
}], { title: 'Mood scores', polar: { radialaxis: { range: [0, 1] } } });

var energyTimes = __ENERGY_TIMES__;
var energyValues = __ENERGY_VALUES__;
Plotly.newPlot('energy', [{
  x: energyTimes, y: energyValues, mode: 'lines', fill: 'tozeroy'
}], { title: 'Energy profile', xaxis: { title: 'seconds' }, yaxis: { title: 'RMS energy' } });
</script>
</body>
</html>
"#;

/// Export a report for one analysis next to the input file.
///
/// Returns the path of the written report. HTML reports open in the default
/// browser; a browser launch failure is logged, not fatal.
pub fn export_report(
    analysis: &TrackAnalysis,
    input: &Path,
    format: ReportFormat,
    open_browser: bool,
) -> Result<PathBuf> {
    match format {
        ReportFormat::Json => {
            let path = PathBuf::from(format!("{}_report.json", input.display()));
            let json = serde_json::to_string_pretty(analysis)
                .context("Failed to serialize analysis")?;
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
            Ok(path)
        }
        ReportFormat::Html => {
            let path = PathBuf::from(format!("{}_report.html", input.display()));
            let html = render_html(analysis)?;
            fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());

            if open_browser {
                if let Err(e) = open::that(&path) {
                    log::warn!("Could not open browser: {}", e);
                }
            }
            Ok(path)
        }
    }
}

fn render_html(analysis: &TrackAnalysis) -> Result<String> {
    let key_times: Vec<f32> = analysis.key_changes.iter().map(|k| k.time).collect();
    let key_confidence: Vec<f32> = analysis.key_changes.iter().map(|k| k.confidence).collect();
    let key_labels: Vec<String> = analysis
        .key_changes
        .iter()
        .map(|k| format!("{} ({})", k.key, k.camelot))
        .collect();
    let energy_times: Vec<f32> = analysis.energy_levels.segments.iter().map(|s| s.time).collect();
    let energy_values: Vec<f32> = analysis
        .energy_levels
        .segments
        .iter()
        .map(|s| s.energy)
        .collect();

    let html = HTML_TEMPLATE
        .replace("__FILENAME__", &escape_html(&analysis.filename))
        .replace("__TEMPO__", &format!("{:.1}", analysis.tempo))
        .replace("__KEY__", &escape_html(&analysis.key))
        .replace("__CAMELOT__", &analysis.camelot.to_string())
        .replace("__CONFIDENCE__", &format!("{:.2}", analysis.confidence))
        .replace("__MOOD__", analysis.mood.primary_mood.as_str())
        .replace("__GENRE__", analysis.genre.genre.as_str())
        .replace("__KEY_CHANGE_COUNT__", &analysis.key_changes.len().to_string())
        .replace("__KEY_TIMES__", &serde_json::to_string(&key_times)?)
        .replace("__KEY_CONFIDENCE__", &serde_json::to_string(&key_confidence)?)
        .replace("__KEY_LABELS__", &serde_json::to_string(&key_labels)?)
        .replace("__MOOD_SCORES__", &serde_json::to_string(&analysis.mood.mood_scores)?)
        .replace("__ENERGY_TIMES__", &serde_json::to_string(&energy_times)?)
        .replace("__ENERGY_VALUES__", &serde_json::to_string(&energy_values)?);

    Ok(html)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
