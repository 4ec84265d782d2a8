//! HTTP client for the neural (Chatterbox) TTS server.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::config::Settings;

use super::Backend;
use super::types::{
    BackendError, EngineKind, HealthResponse, SpeakRequest, VoiceInfo, VoicesResponse,
};

/// Timeout for health probes.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP-based neural backend.
pub struct NeuralBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl NeuralBackend {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Create a client from the host, port and timeout in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, BackendError> {
        Self::new(
            settings.neural_url(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the server health endpoint.
    pub fn health(&self) -> Result<HealthResponse, BackendError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    /// Synthesize with one of the server's own voices.
    fn speak_json(&self, request: &SpeakRequest) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/v1/audio/speech", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        read_audio(response)
    }

    /// Synthesize while cloning the voice in `clip`.
    fn speak_cloned(&self, request: &SpeakRequest, clip: &Path) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/v1/audio/speech/upload", self.base_url);

        let clip_data = std::fs::read(clip)
            .map_err(|_| BackendError::FileNotFound(clip.display().to_string()))?;

        let file_name = clip
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("voice.wav");

        let file_part = reqwest::blocking::multipart::Part::bytes(clip_data)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let form = reqwest::blocking::multipart::Form::new()
            .text("input", request.text.clone())
            .text("language", request.language.clone())
            .text("speed", request.speed.to_string())
            .part("voice_file", file_part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        read_audio(response)
    }
}

fn read_audio(response: reqwest::blocking::Response) -> Result<Vec<u8>, BackendError> {
    if !response.status().is_success() {
        return Err(BackendError::RequestFailed(format!(
            "Status: {}",
            response.status()
        )));
    }

    let audio = response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

    ensure_wav(audio)
}

/// Reject payloads that are not RIFF/WAV audio.
pub(crate) fn ensure_wav(audio: Vec<u8>) -> Result<Vec<u8>, BackendError> {
    if audio.len() < 12 || !audio.starts_with(b"RIFF") || &audio[8..12] != b"WAVE" {
        return Err(BackendError::InvalidResponse(format!(
            "Expected WAV audio, got {} bytes",
            audio.len()
        )));
    }
    Ok(audio)
}

impl Backend for NeuralBackend {
    fn kind(&self) -> EngineKind {
        EngineKind::Neural
    }

    fn name(&self) -> String {
        "chatterbox".to_string()
    }

    fn is_available(&self) -> bool {
        match self.health() {
            Ok(health) if health.status == "healthy" => true,
            Ok(health) => {
                debug!("Neural backend reports status '{}'", health.status);
                false
            }
            Err(e) => {
                debug!("Neural backend at {} unavailable: {e}", self.base_url);
                false
            }
        }
    }

    fn synthesize(&self, request: &SpeakRequest) -> Result<Vec<u8>, BackendError> {
        match &request.reference_audio {
            Some(clip) => self.speak_cloned(request, clip),
            None => self.speak_json(request),
        }
    }

    fn list_voices(&self) -> Result<Vec<VoiceInfo>, BackendError> {
        let url = format!("{}/voices", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        let body: VoicesResponse = response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(body
            .voices
            .into_iter()
            .map(|voice| VoiceInfo {
                source: "neural".to_string(),
                ..voice
            })
            .collect())
    }
}
