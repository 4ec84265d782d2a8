//! Settings file loading with defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cli::{EngineChoice, SPEED_RANGE};

/// Messages longer than this many characters are truncated.
pub const DEFAULT_MAX_LENGTH: usize = 500;

/// Characters kept when a message is truncated.
pub const DEFAULT_TRUNCATE_TO: usize = 150;

/// Default port of the Chatterbox TTS server.
pub const DEFAULT_NEURAL_PORT: u16 = 4123;

/// Errors that can occur while reading or writing settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Notification speaker settings.
///
/// Every field may be omitted from the file; missing fields take the
/// values from [`Settings::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub enabled: bool,
    pub engine: EngineChoice,
    /// Neural voice, or the name of a registered reference clip.
    pub voice: Option<String>,
    /// Voice passed to `say` / `espeak`.
    pub system_voice: Option<String>,
    pub language: String,
    pub volume: f32,
    pub speed: f32,
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
    pub max_length: usize,
    pub truncate_to: usize,
    /// Preferred audio player program.
    pub player: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            engine: EngineChoice::Auto,
            voice: None,
            system_voice: None,
            language: "es".to_string(),
            volume: 0.8,
            speed: 1.0,
            host: "localhost".to_string(),
            port: DEFAULT_NEURAL_PORT,
            timeout_secs: 60,
            max_length: DEFAULT_MAX_LENGTH,
            truncate_to: DEFAULT_TRUNCATE_TO,
            player: None,
        }
    }
}

impl Settings {
    /// Default settings location: `~/.voice-notify/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHomeDir)?;
        Ok(home.join(".voice-notify").join("settings.json"))
    }

    /// Read settings from `path`, failing on a missing or malformed file.
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.normalized())
    }

    /// Read settings from `path`, falling back to defaults.
    ///
    /// A missing, unreadable or malformed file is logged, never fatal.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            warn!(
                "Settings file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(settings) => {
                debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Error reading {}: {e}. Using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        Ok(())
    }

    /// Clamp values into their usable ranges.
    pub fn normalized(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            Self::default().volume
        };

        self.speed = if self.speed.is_finite() {
            self.speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1)
        } else {
            Self::default().speed
        };

        self.truncate_to = self.truncate_to.min(self.max_length);
        self
    }

    /// Apply per-invocation CLI overrides.
    pub fn with_overrides(
        mut self,
        engine: Option<EngineChoice>,
        speed: Option<f32>,
        host: Option<String>,
    ) -> Self {
        if let Some(engine) = engine {
            self.engine = engine;
        }
        if let Some(speed) = speed {
            self.speed = speed;
        }
        if let Some(host) = host {
            self.host = host;
        }
        self.normalized()
    }

    /// Base URL of the neural backend.
    pub fn neural_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
