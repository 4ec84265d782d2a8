//! Audio post-processing and playback.

mod player;
mod volume;

pub use player::{CommandPlayer, PLAYER_ORDER, Playback, classify_failure, player_args};
pub use volume::scale_volume;

#[cfg(test)]
pub use player::MockPlayback;

use thiserror::Error;

/// Errors that can occur while processing or playing audio.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio player found (tried {})", PLAYER_ORDER.join(", "))]
    NoPlayer,

    #[error("No audio device or driver available: {0}")]
    NoAudioDevice(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    #[error("Invalid WAV data: {0}")]
    WavError(#[from] hound::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
