//! Raw feature extraction
//!
//! STFT-based spectral summaries, MFCC timbre coefficients, and the onset
//! strength envelope. These are the scalar/array inputs the heuristic
//! classifiers consume; the FFT itself is delegated to rustfft.

mod mfcc;
mod rhythm;
mod spectral;
mod stft;

pub use mfcc::{mfcc_stats, TimbreStats};
pub use rhythm::{onset_envelope, rhythm_stability, strength_at_beats};
pub use spectral::{spectral_means, SpectralMeans};
pub use stft::{Stft, FRAME_SIZE, HOP_SIZE};
