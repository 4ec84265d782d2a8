//! Reference clip storage for voice cloning.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::backend::VoiceInfo;

/// Errors that can occur during voice management.
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Voice not found: {0}")]
    NotFound(String),

    #[error("Voice already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid voice name: {0}")]
    InvalidName(String),

    #[error("Invalid reference clip {path}: {reason}")]
    InvalidClip { path: PathBuf, reason: String },

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A registered reference clip.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceVoice {
    pub name: String,
    pub path: PathBuf,
    /// Clip length in seconds.
    pub duration: Option<f32>,
}

impl From<ReferenceVoice> for VoiceInfo {
    fn from(voice: ReferenceVoice) -> Self {
        VoiceInfo {
            name: voice.name,
            language: None,
            source: "reference".to_string(),
            duration: voice.duration,
        }
    }
}

/// Manages locally stored reference clips.
pub struct VoiceManager {
    voices_dir: PathBuf,
}

impl VoiceManager {
    /// Create a new VoiceManager with the default directory
    /// (`~/.voice-notify/voices`).
    pub fn new() -> Result<Self, VoiceError> {
        let voices_dir = dirs::home_dir()
            .ok_or(VoiceError::NoHomeDir)?
            .join(".voice-notify")
            .join("voices");

        Ok(Self { voices_dir })
    }

    /// Create a new VoiceManager with a custom directory.
    pub fn with_dir(voices_dir: PathBuf) -> Self {
        Self { voices_dir }
    }

    /// Get the voices directory path.
    pub fn voices_dir(&self) -> &Path {
        &self.voices_dir
    }

    /// Validate a voice name.
    fn validate_name(name: &str) -> Result<(), VoiceError> {
        if name.is_empty() {
            return Err(VoiceError::InvalidName("Name cannot be empty".to_string()));
        }

        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(VoiceError::InvalidName(
                "Name cannot contain path separators".to_string(),
            ));
        }

        Ok(())
    }

    fn clip_path(&self, name: &str) -> PathBuf {
        self.voices_dir.join(format!("{name}.wav"))
    }

    /// Copy `clip` into the store as `name`.
    ///
    /// The clip must be readable as WAV audio.
    pub fn add_reference(&self, name: &str, clip: &Path) -> Result<ReferenceVoice, VoiceError> {
        Self::validate_name(name)?;

        let duration = clip_duration(clip).map_err(|reason| VoiceError::InvalidClip {
            path: clip.to_path_buf(),
            reason,
        })?;

        let path = self.clip_path(name);
        if path.exists() {
            return Err(VoiceError::AlreadyExists(name.to_string()));
        }

        std::fs::create_dir_all(&self.voices_dir)?;
        std::fs::copy(clip, &path)?;
        debug!("Stored reference clip '{name}' at {}", path.display());

        Ok(ReferenceVoice {
            name: name.to_string(),
            path,
            duration: Some(duration),
        })
    }

    /// Path of the clip registered as `name`, if any.
    ///
    /// Invalid names resolve to `None`, so any voice string is safe to look up.
    pub fn reference_path(&self, name: &str) -> Option<PathBuf> {
        Self::validate_name(name).ok()?;
        let path = self.clip_path(name);
        path.is_file().then_some(path)
    }

    /// Remove the clip registered as `name`.
    pub fn delete_reference(&self, name: &str) -> Result<(), VoiceError> {
        Self::validate_name(name)?;

        let path = self.clip_path(name);
        if !path.exists() {
            return Err(VoiceError::NotFound(name.to_string()));
        }

        std::fs::remove_file(path)?;
        Ok(())
    }

    /// List all registered clips, sorted by name.
    pub fn list_references(&self) -> Result<Vec<ReferenceVoice>, VoiceError> {
        if !self.voices_dir.exists() {
            return Ok(Vec::new());
        }

        let mut voices = Vec::new();

        for entry in std::fs::read_dir(&self.voices_dir)? {
            let path = entry?.path();

            if !path.extension().is_some_and(|ext| ext == "wav") {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            voices.push(ReferenceVoice {
                name: name.to_string(),
                duration: clip_duration(&path).ok(),
                path: path.clone(),
            });
        }

        voices.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(voices)
    }
}

/// Length of a WAV clip in seconds.
fn clip_duration(path: &Path) -> Result<f32, String> {
    let reader = hound::WavReader::open(path).map_err(|e| e.to_string())?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err("sample rate is zero".to_string());
    }
    Ok(reader.duration() as f32 / spec.sample_rate as f32)
}
