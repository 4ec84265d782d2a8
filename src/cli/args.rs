//! CLI argument definitions and parsing.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Speak short notification messages aloud.
#[derive(Parser, Debug)]
#[command(name = "voice-notify")]
#[command(about = "Speak notification messages with a voice-cloning model or the OS voice")]
#[command(version)]
pub struct Args {
    /// Text to speak
    #[arg(short, long)]
    pub text: Option<String>,

    /// Voice to use for this message (overrides settings)
    #[arg(long)]
    pub voice: Option<String>,

    /// TTS engine: "auto" (neural, falling back to the OS voice), "neural" or "system"
    #[arg(short, long, value_enum)]
    pub engine: Option<EngineChoice>,

    /// Speech speed multiplier (0.5 to 2.0)
    #[arg(short, long, value_parser = parse_speed)]
    pub speed: Option<f32>,

    /// Settings file (defaults to ~/.voice-notify/settings.json)
    #[arg(short, long, env = "VOICE_NOTIFY_SETTINGS")]
    pub config: Option<PathBuf>,

    /// Neural backend host address
    #[arg(long)]
    pub host: Option<String>,

    /// List available voices
    #[arg(long)]
    pub list_voices: bool,

    /// Register a reference clip for voice cloning: "name=clip.wav"
    #[arg(long)]
    pub add_voice: Option<String>,

    /// Delete a registered reference clip
    #[arg(long)]
    pub delete_voice: Option<String>,

    /// Write the default settings file if it does not exist
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Which engine(s) to try when speaking.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineChoice {
    /// Neural voice first, OS voice as fallback
    #[default]
    #[value(name = "auto")]
    Auto,

    /// Neural voice-cloning model only
    #[value(name = "neural")]
    Neural,

    /// Operating-system synthesizer only
    #[value(name = "system")]
    System,
}

impl EngineChoice {
    /// Returns the CLI argument string for this choice.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineChoice::Auto => "auto",
            EngineChoice::Neural => "neural",
            EngineChoice::System => "system",
        }
    }
}

/// Smallest and largest accepted speed multipliers.
pub const SPEED_RANGE: (f32, f32) = (0.5, 2.0);

pub(crate) fn parse_speed(input: &str) -> Result<f32, String> {
    let speed: f32 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{input}' is not a number"))?;

    if !(SPEED_RANGE.0..=SPEED_RANGE.1).contains(&speed) {
        return Err(format!(
            "speed must be between {} and {}",
            SPEED_RANGE.0, SPEED_RANGE.1
        ));
    }

    Ok(speed)
}

/// Parsed `name=clip.wav` argument for registering a reference voice.
#[derive(Debug, Clone)]
pub struct VoiceSpec {
    /// Name the clip will be registered under.
    pub name: String,
    /// Path to the reference audio clip.
    pub clip_path: PathBuf,
}

/// Errors that can occur when parsing a voice spec.
#[derive(Error, Debug)]
pub enum VoiceSpecParseError {
    #[error("Invalid format: {0}. Expected 'name=clip.wav'")]
    InvalidFormat(String),

    #[error("Reference clip not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Voice name cannot be empty")]
    EmptyName,
}

impl VoiceSpec {
    /// Parse a voice spec from "name=path/to/clip.wav".
    ///
    /// The split happens on the first `=`, so the path may contain `=`.
    ///
    /// # Examples
    /// ```
    /// use voice_notify::cli::VoiceSpec;
    /// let spec = VoiceSpec::parse("narrator=clip.wav");
    /// ```
    pub fn parse(input: &str) -> Result<Self, VoiceSpecParseError> {
        let Some((name, path)) = input.split_once('=') else {
            return Err(VoiceSpecParseError::InvalidFormat(
                "Missing '=' separator".to_string(),
            ));
        };

        let name = name.trim().to_string();
        let clip_path = PathBuf::from(path.trim());

        if name.is_empty() {
            return Err(VoiceSpecParseError::EmptyName);
        }

        if !clip_path.exists() {
            return Err(VoiceSpecParseError::FileNotFound(clip_path));
        }

        Ok(Self { name, clip_path })
    }
}

