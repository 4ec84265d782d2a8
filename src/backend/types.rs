//! Backend request/response types.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while synthesizing speech.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The family a backend belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Voice-cloning model served over HTTP.
    Neural,
    /// Operating-system synthesizer (`say`, `espeak`).
    System,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Neural => f.write_str("neural"),
            EngineKind::System => f.write_str("system"),
        }
    }
}

/// Health check response from the neural server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub device: Option<String>,
}

/// A voice offered by some source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Where the voice comes from, e.g. "reference", "neural" or "say".
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
}

/// Response from the neural server's voice list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

/// Request for speech synthesis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeakRequest {
    #[serde(rename = "input")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    pub language: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Reference clip for voice cloning.
    #[serde(skip)]
    pub reference_audio: Option<PathBuf>,
}

fn default_speed() -> f32 {
    1.0
}

impl SpeakRequest {
    /// Create a new synthesis request.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            language: "es".to_string(),
            speed: 1.0,
            reference_audio: None,
        }
    }

    /// Set the voice name.
    pub fn with_voice(mut self, name: impl Into<String>) -> Self {
        self.voice = Some(name.into());
        self
    }

    /// Set the language id.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the speech speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the reference clip to clone.
    pub fn with_reference_audio(mut self, path: PathBuf) -> Self {
        self.reference_audio = Some(path);
        self
    }
}
