//! Playback through an external audio player.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::backend::find_program;

use super::AudioError;

/// Players tried, in order, when none is configured.
pub const PLAYER_ORDER: [&str; 4] = ["afplay", "paplay", "aplay", "ffplay"];

/// Something that can play WAV audio.
#[cfg_attr(test, mockall::automock)]
pub trait Playback: Send + Sync {
    /// Play WAV bytes, blocking until playback ends.
    fn play(&self, wav: &[u8]) -> Result<(), AudioError>;
}

/// Plays audio by handing a temporary WAV file to a player program.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    bin: PathBuf,
    args: Vec<String>,
}

impl CommandPlayer {
    /// Create a player running `bin` with the flags appropriate for it.
    pub fn new(bin: PathBuf) -> Self {
        let name = bin
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        Self {
            args: player_args(&name).iter().map(|a| a.to_string()).collect(),
            bin,
        }
    }

    /// Pick the configured player if installed, else the first of
    /// [`PLAYER_ORDER`] found on `PATH`.
    pub fn detect(preferred: Option<&str>) -> Result<Self, AudioError> {
        if let Some(name) = preferred {
            match find_program(name) {
                Some(bin) => return Ok(Self::new(bin)),
                None => debug!("Configured player '{name}' not found, trying defaults"),
            }
        }

        PLAYER_ORDER
            .iter()
            .find_map(|name| find_program(name))
            .map(Self::new)
            .ok_or(AudioError::NoPlayer)
    }

    /// Path of the player program.
    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// Full argument list for playing `file`.
    pub fn command_args(&self, file: &Path) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(file.display().to_string());
        args
    }
}

/// Extra flags each known player needs to play a file and exit quietly.
pub fn player_args(name: &str) -> &'static [&'static str] {
    match name {
        "ffplay" => &["-nodisp", "-autoexit", "-loglevel", "quiet"],
        "aplay" => &["-q"],
        _ => &[],
    }
}

impl Playback for CommandPlayer {
    fn play(&self, wav: &[u8]) -> Result<(), AudioError> {
        let mut file = tempfile::Builder::new()
            .prefix("voice-notify-play-")
            .suffix(".wav")
            .tempfile()?;
        file.write_all(wav)?;
        file.flush()?;

        debug!("Playing {} bytes with {}", wav.len(), self.bin.display());

        let output = Command::new(&self.bin)
            .args(self.command_args(file.path()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(classify_failure(stderr))
    }
}

/// Map a player's error output to the matching [`AudioError`].
pub fn classify_failure(message: String) -> AudioError {
    let lower = message.to_lowercase();
    if lower.contains("audio") || lower.contains("device") {
        AudioError::NoAudioDevice(message)
    } else {
        AudioError::PlaybackFailed(message)
    }
}
