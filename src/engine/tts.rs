//! Engine selection and speaking.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::{AudioError, Playback, scale_volume};
use crate::backend::{Backend, BackendError, EngineKind, SpeakRequest, VoiceInfo};
use crate::cli::EngineChoice;
use crate::config::Settings;
use crate::voice::VoiceManager;

use super::text::prepare_text;

/// Errors that can occur while speaking.
#[derive(Error, Debug)]
pub enum SpeakError {
    #[error("No TTS engine available (tried: {0})")]
    NoEngineAvailable(String),

    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Audio error: {0}")]
    AudioError(#[from] AudioError),
}

/// Why a message was not spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Notifications are turned off in settings.
    Disabled,
    /// The message was empty or whitespace.
    EmptyText,
}

/// Result of a successful [`Speaker::speak`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakOutcome {
    Spoken {
        engine: String,
        kind: EngineKind,
        truncated: bool,
    },
    Skipped(SkipReason),
}

/// Picks a backend, synthesizes, and plays the result.
pub struct Speaker<P: Playback> {
    neural: Option<Box<dyn Backend>>,
    system: Option<Box<dyn Backend>>,
    player: Option<P>,
    voices: VoiceManager,
    settings: Settings,
}

impl<P: Playback> Speaker<P> {
    /// Create a speaker with no backends or player attached.
    pub fn new(settings: Settings, voices: VoiceManager) -> Self {
        Self {
            neural: None,
            system: None,
            player: None,
            voices,
            settings,
        }
    }

    /// Attach the audio player.
    pub fn with_player(mut self, player: P) -> Self {
        self.player = Some(player);
        self
    }

    /// Attach the neural backend.
    pub fn with_neural(mut self, backend: impl Backend + 'static) -> Self {
        self.neural = Some(Box::new(backend));
        self
    }

    /// Attach the fallback OS backend.
    pub fn with_system(mut self, backend: impl Backend + 'static) -> Self {
        self.system = Some(Box::new(backend));
        self
    }

    /// Effective settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Backends to try, in order, for the configured engine choice.
    fn candidates(&self) -> Vec<&dyn Backend> {
        let order = match self.settings.engine {
            EngineChoice::Auto => vec![&self.neural, &self.system],
            EngineChoice::Neural => vec![&self.neural],
            EngineChoice::System => vec![&self.system],
        };

        order
            .into_iter()
            .filter_map(|backend| backend.as_deref())
            .collect()
    }

    /// Build the request a backend of `kind` should receive.
    fn request_for(&self, kind: EngineKind, text: &str, voice: Option<&str>) -> SpeakRequest {
        let mut request = SpeakRequest::new(text)
            .with_language(self.settings.language.clone())
            .with_speed(self.settings.speed);

        match kind {
            EngineKind::Neural => {
                let voice = voice.or(self.settings.voice.as_deref());
                if let Some(name) = voice {
                    request = match self.voices.reference_path(name) {
                        Some(clip) => {
                            debug!("Cloning reference voice '{name}'");
                            request.with_reference_audio(clip)
                        }
                        None => request.with_voice(name),
                    };
                }
            }
            EngineKind::System => {
                let voice = match self.settings.engine {
                    EngineChoice::System => voice.or(self.settings.system_voice.as_deref()),
                    _ => self.settings.system_voice.as_deref(),
                };
                if let Some(name) = voice {
                    request = request.with_voice(name);
                }
            }
        }

        request
    }

    /// Speak `text`, optionally overriding the configured voice.
    ///
    /// In `auto` mode a neural backend that is down or fails to synthesize
    /// falls back to the OS synthesizer. A playback failure is final.
    pub fn speak(&self, text: &str, voice: Option<&str>) -> Result<SpeakOutcome, SpeakError> {
        if !self.settings.enabled {
            info!("Voice notifications disabled, not speaking");
            return Ok(SpeakOutcome::Skipped(SkipReason::Disabled));
        }

        let Some(prepared) =
            prepare_text(text, self.settings.max_length, self.settings.truncate_to)
        else {
            debug!("Skipping empty message");
            return Ok(SpeakOutcome::Skipped(SkipReason::EmptyText));
        };

        let player = self.player.as_ref().ok_or(AudioError::NoPlayer)?;

        if prepared.truncated {
            debug!(
                "Message truncated to {} characters",
                self.settings.truncate_to
            );
        }

        let mut tried = Vec::new();
        let mut last_error: Option<BackendError> = None;

        for backend in self.candidates() {
            let name = backend.name();
            tried.push(name.clone());

            if !backend.is_available() {
                info!("{name} unavailable, skipping");
                continue;
            }

            let request = self.request_for(backend.kind(), &prepared.text, voice);

            let wav = match backend.synthesize(&request) {
                Ok(wav) => wav,
                Err(e) => {
                    warn!("{name} failed to synthesize: {e}");
                    last_error = Some(e);
                    continue;
                }
            };

            let audio = match scale_volume(&wav, self.settings.volume) {
                Ok(audio) => audio,
                Err(e) => {
                    warn!("Could not adjust volume, playing as-is: {e}");
                    wav
                }
            };

            player.play(&audio)?;
            debug!(
                "Played message with {name}, voice {}",
                request.voice.as_deref().unwrap_or("default")
            );

            return Ok(SpeakOutcome::Spoken {
                engine: name,
                kind: backend.kind(),
                truncated: prepared.truncated,
            });
        }

        match last_error {
            Some(e) => Err(e.into()),
            None if tried.is_empty() => Err(SpeakError::NoEngineAvailable(format!(
                "no {} engine configured",
                self.settings.engine.as_str()
            ))),
            None => Err(SpeakError::NoEngineAvailable(tried.join(", "))),
        }
    }

    /// Voices from every source: reference clips, then neural, then OS.
    ///
    /// A source that cannot be queried is logged and left out.
    pub fn list_voices(&self) -> Vec<VoiceInfo> {
        let mut voices: Vec<VoiceInfo> = match self.voices.list_references() {
            Ok(references) => references.into_iter().map(VoiceInfo::from).collect(),
            Err(e) => {
                warn!("Could not list reference clips: {e}");
                Vec::new()
            }
        };

        for backend in [&self.neural, &self.system].into_iter().flatten() {
            if !backend.is_available() {
                debug!("{} unavailable, not listing its voices", backend.name());
                continue;
            }

            match backend.list_voices() {
                Ok(found) => voices.extend(found),
                Err(e) => warn!("Could not list {} voices: {e}", backend.name()),
            }
        }

        voices
    }
}
