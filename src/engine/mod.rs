//! Speaking orchestrator.
//!
//! This module ties settings, backends, voices and playback together:
//! it prepares the text, walks the backends in preference order, and
//! plays the first successful synthesis.

mod text;
mod tts;

pub use text::{ELLIPSIS, PreparedText, prepare_text};
pub use tts::{SkipReason, SpeakError, SpeakOutcome, Speaker};
