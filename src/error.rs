//! Typed analysis errors

use std::path::PathBuf;

/// Errors produced by the analysis core
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Failed to open audio file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported or unreadable audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Audio too short for analysis ({samples} samples)")]
    TooShort { samples: usize },

    #[error("Analysis engine failed: {0}")]
    Engine(String),

    #[error("Failed to write artifact {path:?}: {message}")]
    Artifact { path: PathBuf, message: String },
}
