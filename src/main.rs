//! voice-notify CLI entry point.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use voice_notify::audio::{CommandPlayer, Playback};
use voice_notify::backend::{NeuralBackend, SystemBackend};
use voice_notify::cli::{Args, EngineChoice, VoiceSpec};
use voice_notify::config::Settings;
use voice_notify::engine::{SkipReason, SpeakOutcome, Speaker};
use voice_notify::voice::VoiceManager;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings_path = match &args.config {
        Some(path) => path.clone(),
        None => Settings::default_path().context("Failed to locate settings file")?,
    };

    // Handle utility commands first
    if args.init_config {
        return init_config(&settings_path);
    }

    let voices = VoiceManager::new().context("Failed to locate voices directory")?;

    if let Some(spec) = &args.add_voice {
        return add_voice(&voices, spec);
    }

    if let Some(name) = &args.delete_voice {
        voices
            .delete_reference(name)
            .with_context(|| format!("Failed to delete voice '{name}'"))?;
        println!("Voice '{name}' deleted.");
        return Ok(());
    }

    let settings =
        Settings::load(&settings_path).with_overrides(args.engine, args.speed, args.host.clone());

    if args.list_voices {
        let speaker = build_speaker::<CommandPlayer>(settings, voices)?;
        return list_voices(&speaker);
    }

    let Some(text) = &args.text else {
        Args::command().print_help()?;
        std::process::exit(1);
    };

    // A missing player only matters once there is something to play.
    let player = CommandPlayer::detect(settings.player.as_deref());
    let mut speaker = build_speaker(settings, voices)?;
    match player {
        Ok(player) => speaker = speaker.with_player(player),
        Err(e) => debug!("{e}"),
    }

    let outcome = speaker
        .speak(text, args.voice.as_deref())
        .context("Failed to speak message")?;

    match outcome {
        SpeakOutcome::Spoken { engine, truncated, .. } => {
            let note = if truncated { " (truncated)" } else { "" };
            info!("Spoke message with {engine}{note}");
        }
        SpeakOutcome::Skipped(SkipReason::Disabled) => info!("Notifications are disabled"),
        SpeakOutcome::Skipped(SkipReason::EmptyText) => {}
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Attach the backends the configured engine choice can use.
fn build_speaker<P: Playback>(
    settings: Settings,
    voices: VoiceManager,
) -> Result<Speaker<P>> {
    let engine = settings.engine;
    let neural = match engine {
        EngineChoice::System => None,
        _ => Some(
            NeuralBackend::from_settings(&settings).context("Failed to create neural backend")?,
        ),
    };
    let system = match engine {
        EngineChoice::Neural => None,
        _ => SystemBackend::detect(),
    };

    if system.is_none() && engine != EngineChoice::Neural {
        warn!("No OS speech program found (tried say, espeak-ng, espeak)");
    }

    let mut speaker = Speaker::new(settings, voices);
    if let Some(backend) = neural {
        speaker = speaker.with_neural(backend);
    }
    if let Some(backend) = system {
        speaker = speaker.with_system(backend);
    }

    Ok(speaker)
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Settings already exist at {}", path.display());
        return Ok(());
    }

    Settings::default()
        .save(path)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    println!("Settings written to {}", path.display());
    Ok(())
}

fn add_voice(voices: &VoiceManager, spec: &str) -> Result<()> {
    let spec = VoiceSpec::parse(spec)?;

    let voice = voices
        .add_reference(&spec.name, &spec.clip_path)
        .with_context(|| format!("Failed to register voice '{}'", spec.name))?;

    println!("Voice registered: {}", voice.name);
    println!("  Clip: {}", voice.path.display());
    if let Some(duration) = voice.duration {
        println!("  Duration: {:.2}s", duration);
    }

    Ok(())
}

fn list_voices<P: Playback>(speaker: &Speaker<P>) -> Result<()> {
    let voices = speaker.list_voices();

    if voices.is_empty() {
        println!("No voices found.");
        return Ok(());
    }

    println!("Available voices:");
    for voice in voices {
        match &voice.language {
            Some(language) => println!("  {} [{}] ({})", voice.name, language, voice.source),
            None => println!("  {} ({})", voice.name, voice.source),
        }
        if let Some(duration) = voice.duration {
            println!("    Duration: {:.2}s", duration);
        }
    }

    println!("\nUsage: voice-notify --text \"...\" --voice <name>");
    Ok(())
}
