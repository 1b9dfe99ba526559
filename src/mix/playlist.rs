//! Playlist ordering
//!
//! Orders a set of analyzed tracks by energy, then scores each transition
//! with the pairwise compatibility metric. The default ordering builds
//! energy up over the set; a target mood instead puts the best-scoring
//! tracks for that mood first.

use super::compatibility::{mix_compatibility, MixScales};
use crate::model::{MoodLabel, PlaylistEntry, TrackAnalysis};
use std::path::PathBuf;

/// One analyzed track with the path it came from
#[derive(Debug, Clone)]
pub struct AnalyzedTrack {
    pub path: PathBuf,
    pub analysis: TrackAnalysis,
}

/// Order tracks into a playlist and score the transitions.
///
/// Without a target mood, tracks are sorted by ascending energy. With one,
/// they are sorted by descending score for that mood. The first entry's
/// transition score is 1; every later entry carries the compatibility score
/// of the transition from its predecessor.
pub fn order_playlist(
    mut tracks: Vec<AnalyzedTrack>,
    target_mood: Option<MoodLabel>,
    scales: &MixScales,
) -> Vec<PlaylistEntry> {
    match target_mood {
        Some(mood) => {
            tracks.sort_by(|a, b| {
                let sa = a.analysis.mood.mood_scores.get(mood);
                let sb = b.analysis.mood.mood_scores.get(mood);
                sb.total_cmp(&sa)
            });
        }
        None => {
            tracks.sort_by(|a, b| {
                a.analysis
                    .mood
                    .features
                    .energy
                    .total_cmp(&b.analysis.mood.features.energy)
            });
        }
    }

    let mut entries: Vec<PlaylistEntry> = Vec::with_capacity(tracks.len());

    for track in tracks {
        let transition_score = match entries.last() {
            Some(prev) => {
                mix_compatibility(&prev.analysis, &track.analysis, scales).overall_score
            }
            None => 1.0,
        };
        entries.push(PlaylistEntry {
            track: track.path,
            analysis: track.analysis,
            transition_score,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camelot::Camelot;
    use crate::model::{
        BeatGrid, EnergyLevels, GenreAnalysis, GenreFeatures, GenreLabel, MoodAnalysis,
        MoodFeatures, MoodScores,
    };

    fn track(name: &str, tempo: f32, energy: f32, energetic_score: f32) -> AnalyzedTrack {
        let camelot = Camelot::from_key_name("A minor");
        AnalyzedTrack {
            path: PathBuf::from(name),
            analysis: TrackAnalysis {
                filename: name.to_string(),
                tempo,
                key: "A minor".to_string(),
                harmonic_matches: camelot.harmonic_matches(),
                camelot,
                confidence: 0.9,
                key_changes: Vec::new(),
                mood: MoodAnalysis {
                    primary_mood: MoodLabel::Sad,
                    mood_scores: MoodScores {
                        energetic: energetic_score,
                        calm: 0.0,
                        dark: 0.0,
                        sad: 0.0,
                    },
                    features: MoodFeatures {
                        tempo,
                        energy,
                        brightness: 0.5,
                        contrast: 0.5,
                        rhythm_stability: 0.1,
                    },
                },
                beat_grid: BeatGrid {
                    tempo,
                    beat_times: Vec::new(),
                    beat_strength: Vec::new(),
                    is_quantized: false,
                },
                energy_levels: EnergyLevels {
                    segments: Vec::new(),
                    average_energy: energy,
                    energy_variance: 0.0,
                },
                genre: GenreAnalysis {
                    genre: GenreLabel::Other,
                    confidence: 0.0,
                    features: GenreFeatures {
                        mfcc_mean: Vec::new(),
                        mfcc_std: Vec::new(),
                        spectral_centroid: 0.5,
                        spectral_rolloff: 0.5,
                    },
                },
                analysis_time: String::new(),
            },
        }
    }

    #[test]
    fn test_default_order_is_ascending_energy() {
        let tracks = vec![
            track("high.mp3", 128.0, 0.8, 0.9),
            track("low.mp3", 128.0, 0.2, 0.1),
            track("mid.mp3", 128.0, 0.5, 0.5),
        ];
        let playlist = order_playlist(tracks, None, &MixScales::default());
        let names: Vec<&str> = playlist.iter().map(|e| e.analysis.filename.as_str()).collect();
        assert_eq!(names, vec!["low.mp3", "mid.mp3", "high.mp3"]);
    }

    #[test]
    fn test_target_mood_orders_by_descending_score() {
        let tracks = vec![
            track("a.mp3", 128.0, 0.2, 0.3),
            track("b.mp3", 128.0, 0.8, 0.9),
            track("c.mp3", 128.0, 0.5, 0.6),
        ];
        let playlist = order_playlist(tracks, Some(MoodLabel::Energetic), &MixScales::default());
        let names: Vec<&str> = playlist.iter().map(|e| e.analysis.filename.as_str()).collect();
        assert_eq!(names, vec!["b.mp3", "c.mp3", "a.mp3"]);
    }

    #[test]
    fn test_first_entry_scores_one() {
        let tracks = vec![track("only.mp3", 128.0, 0.5, 0.5)];
        let playlist = order_playlist(tracks, None, &MixScales::default());
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist[0].transition_score, 1.0);
    }

    #[test]
    fn test_transitions_score_against_predecessor() {
        // Same key and energy step of 0.1; tempo gap of 10 BPM between
        // neighbors gives a known transition score
        let tracks = vec![
            track("a.mp3", 120.0, 0.4, 0.0),
            track("b.mp3", 130.0, 0.5, 0.0),
        ];
        let playlist = order_playlist(tracks, None, &MixScales::default());
        let expected = (0.5 + 1.0 + 0.8) / 3.0;
        assert!((playlist[1].transition_score - expected).abs() < 1e-6);
    }

    #[test]
    fn test_empty_input_yields_empty_playlist() {
        let playlist = order_playlist(Vec::new(), None, &MixScales::default());
        assert!(playlist.is_empty());
    }
}
