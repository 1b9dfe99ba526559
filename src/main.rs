use anyhow::{bail, Context, Result};
use audet::analysis::{AnalyzerConfig, TrackAnalyzer};
use audet::export::{process_folder, save_results, export_report, ReportFormat};
use audet::mix::{mix_compatibility, order_playlist, AnalyzedTrack, MixScales};
use audet::model::MoodLabel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "audet")]
#[command(about = "Analyze audio tracks for tempo, key, mood, and mixability", long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Minimum BPM for detection range (default: 70)
    #[arg(long, global = true, default_value = "70")]
    min_bpm: f32,

    /// Maximum BPM for detection range (default: 170)
    #[arg(long, global = true, default_value = "170")]
    max_bpm: f32,

    /// Skip writing waveform PNG artifacts
    #[arg(long, global = true)]
    no_waveform: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one file or every audio file in a folder
    Run {
        /// Audio file or folder to analyze
        path: PathBuf,
    },

    /// Score how well the second track follows the first in a mix
    Mix {
        track_a: PathBuf,
        track_b: PathBuf,
    },

    /// Order tracks into a playlist with transition scores
    Playlist {
        /// Audio files to include
        #[arg(required = true)]
        tracks: Vec<PathBuf>,

        /// Sort by score for this mood instead of ascending energy
        #[arg(long)]
        target_mood: Option<MoodLabel>,
    },

    /// Export an analysis report for one file
    Report {
        file: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value = "html")]
        format: ReportFormat,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = AnalyzerConfig::default()
        .with_bpm_range(args.min_bpm, args.max_bpm)
        .with_waveform(!args.no_waveform);
    let analyzer = TrackAnalyzer::new(config);

    match args.command {
        Command::Run { path } => run(&analyzer, path),
        Command::Mix { track_a, track_b } => mix(&analyzer, track_a, track_b),
        Command::Playlist {
            tracks,
            target_mood,
        } => playlist(&analyzer, tracks, target_mood),
        Command::Report { file, format } => report(&analyzer, file, format),
    }
}

fn run(analyzer: &TrackAnalyzer, path: PathBuf) -> Result<()> {
    if path.is_dir() {
        let results = process_folder(analyzer, &path);
        if results.is_empty() {
            bail!("No audio files could be analyzed in {}", path.display());
        }
        save_results(&path, &results)?;
        println!(
            "Analyzed {} tracks; results in {} and {}",
            results.len(),
            path.join("analysis.json").display(),
            path.join("analysis.csv").display()
        );
        return Ok(());
    }

    let analysis = analyzer
        .analyze_file(&path)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    println!("{}", analysis.filename);
    println!("  Tempo:       {:.1} BPM", analysis.tempo);
    println!(
        "  Key:         {} ({}, confidence {:.2})",
        analysis.key, analysis.camelot, analysis.confidence
    );
    println!("  Mood:        {}", analysis.mood.primary_mood);
    println!("  Genre:       {}", analysis.genre.genre);
    println!("  Key changes: {} windows", analysis.key_changes.len());
    Ok(())
}

fn mix(analyzer: &TrackAnalyzer, track_a: PathBuf, track_b: PathBuf) -> Result<()> {
    let a = analyzer
        .analyze_file(&track_a)
        .with_context(|| format!("Failed to analyze {}", track_a.display()))?;
    let b = analyzer
        .analyze_file(&track_b)
        .with_context(|| format!("Failed to analyze {}", track_b.display()))?;

    let compat = mix_compatibility(&a, &b, &MixScales::default());

    println!("{} -> {}", a.filename, b.filename);
    println!("  Tempo compatibility:  {:.2}", compat.tempo_compatibility);
    println!(
        "  Key compatibility:    {} ({} vs {})",
        if compat.key_compatibility { "yes" } else { "no" },
        a.camelot,
        b.camelot
    );
    println!("  Energy compatibility: {:.2}", compat.energy_compatibility);
    println!("  Overall score:        {:.2}", compat.overall_score);
    Ok(())
}

fn playlist(
    analyzer: &TrackAnalyzer,
    tracks: Vec<PathBuf>,
    target_mood: Option<MoodLabel>,
) -> Result<()> {
    let mut analyzed = Vec::with_capacity(tracks.len());
    for path in tracks {
        let analysis = analyzer
            .analyze_file(&path)
            .with_context(|| format!("Failed to analyze {}", path.display()))?;
        analyzed.push(AnalyzedTrack { path, analysis });
    }

    let entries = order_playlist(analyzed, target_mood, &MixScales::default());

    match target_mood {
        Some(mood) => println!("Playlist (target mood: {}):", mood),
        None => println!("Playlist (energy buildup):"),
    }
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {}. {} ({:.1} BPM, {}, transition {:.2})",
            i + 1,
            entry.analysis.filename,
            entry.analysis.tempo,
            entry.analysis.camelot,
            entry.transition_score
        );
    }
    Ok(())
}

fn report(analyzer: &TrackAnalyzer, file: PathBuf, format: ReportFormat) -> Result<()> {
    let analysis = analyzer
        .analyze_file(&file)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;

    let open_browser = format == ReportFormat::Html;
    let path = export_report(&analysis, &file, format, open_browser)?;
    println!("Report written to {}", path.display());
    Ok(())
}
