//! voice-notify: speak assistant notifications aloud.
//!
//! This crate reads a small JSON settings file, picks a text-to-speech
//! backend (a neural voice-cloning server, or the operating system's
//! synthesizer as fallback), trims long messages, and plays the result.

pub mod audio;
pub mod backend;
pub mod cli;
pub mod config;
pub mod engine;
pub mod voice;
