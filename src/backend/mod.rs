//! Speech synthesis backends.
//!
//! Two families are supported: a neural voice-cloning model reached over
//! HTTP (a Chatterbox server), and the operating-system synthesizer
//! (`say` on macOS, `espeak-ng`/`espeak` elsewhere). Both produce WAV
//! bytes; playback is handled by [`crate::audio`].

mod client;
mod system;
mod types;

pub use client::NeuralBackend;
pub(crate) use client::ensure_wav;
pub use system::{
    BASE_WORDS_PER_MINUTE, SystemBackend, SystemProgram, find_program, words_per_minute,
};
pub use types::{
    BackendError, EngineKind, HealthResponse, SpeakRequest, VoiceInfo, VoicesResponse,
};

/// Trait for TTS backends.
///
/// Abstracts over the HTTP model server and the OS synthesizer,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Which family this backend belongs to.
    fn kind(&self) -> EngineKind;

    /// Short human-readable name used in logs.
    fn name(&self) -> String;

    /// Whether the backend can synthesize right now.
    fn is_available(&self) -> bool;

    /// Synthesize speech from text.
    ///
    /// # Returns
    /// Raw WAV audio data
    fn synthesize(&self, request: &SpeakRequest) -> Result<Vec<u8>, BackendError>;

    /// List the voices this backend offers.
    fn list_voices(&self) -> Result<Vec<VoiceInfo>, BackendError>;
}
