//! Operating-system synthesizers driven as subprocesses.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::{Backend, ensure_wav};
use super::types::{BackendError, EngineKind, SpeakRequest, VoiceInfo};

/// Words per minute at speed 1.0, shared by `say` and `espeak`.
pub const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// A supported OS speech program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemProgram {
    /// macOS `say`
    Say,
    /// `espeak-ng`
    EspeakNg,
    /// legacy `espeak`
    Espeak,
}

impl SystemProgram {
    /// Programs in the order they are looked up on `PATH`.
    pub const DETECTION_ORDER: [SystemProgram; 3] = [
        SystemProgram::Say,
        SystemProgram::EspeakNg,
        SystemProgram::Espeak,
    ];

    /// Executable name.
    pub fn binary(&self) -> &'static str {
        match self {
            SystemProgram::Say => "say",
            SystemProgram::EspeakNg => "espeak-ng",
            SystemProgram::Espeak => "espeak",
        }
    }

    /// Arguments that render `request` into a WAV file at `out`.
    pub fn synth_args(&self, request: &SpeakRequest, out: &Path) -> Vec<OsString> {
        let wpm = words_per_minute(request.speed).to_string();
        let mut args: Vec<OsString> = Vec::new();

        match self {
            SystemProgram::Say => {
                if let Some(voice) = &request.voice {
                    args.push("-v".into());
                    args.push(voice.into());
                }
                args.push("-r".into());
                args.push(wpm.into());
                args.push("--data-format=LEI16@22050".into());
                args.push("-o".into());
                args.push(out.into());
            }
            SystemProgram::EspeakNg | SystemProgram::Espeak => {
                let voice = request.voice.as_deref().unwrap_or(&request.language);
                if !voice.is_empty() {
                    args.push("-v".into());
                    args.push(voice.into());
                }
                args.push("-s".into());
                args.push(wpm.into());
                args.push("-w".into());
                args.push(out.into());
            }
        }

        // Keep a leading '-' in the message from being read as an option.
        args.push("--".into());
        args.push((&request.text).into());
        args
    }

    /// Arguments that print the installed voices.
    pub fn list_args(&self) -> &'static [&'static str] {
        match self {
            SystemProgram::Say => &["-v", "?"],
            SystemProgram::EspeakNg | SystemProgram::Espeak => &["--voices"],
        }
    }

    /// Parse the output of [`SystemProgram::list_args`].
    pub fn parse_voices(&self, output: &str) -> Vec<VoiceInfo> {
        match self {
            SystemProgram::Say => output.lines().filter_map(parse_say_line).collect(),
            SystemProgram::EspeakNg | SystemProgram::Espeak => output
                .lines()
                .filter_map(|line| parse_espeak_line(line, self.binary()))
                .collect(),
        }
    }
}

/// Convert a speed multiplier to a words-per-minute rate.
pub fn words_per_minute(speed: f32) -> u32 {
    (BASE_WORDS_PER_MINUTE * speed).round().max(1.0) as u32
}

/// `Alex                en_US    # Most people recognize me by my voice.`
fn parse_say_line(line: &str) -> Option<VoiceInfo> {
    let head = line.split('#').next()?.trim();
    if head.is_empty() {
        return None;
    }

    let (name, language) = match head.rsplit_once(char::is_whitespace) {
        Some((name, locale)) if looks_like_locale(locale) => {
            (name.trim().to_string(), Some(locale.to_string()))
        }
        _ => (head.to_string(), None),
    };

    Some(VoiceInfo {
        name,
        language,
        source: "say".to_string(),
        duration: None,
    })
}

fn looks_like_locale(token: &str) -> bool {
    let mut parts = token.split(['_', '-']);
    let lang = parts.next().unwrap_or_default();
    (2..=3).contains(&lang.len())
        && lang.chars().all(|c| c.is_ascii_lowercase())
        && parts.next().is_some_and(|region| !region.is_empty())
}

/// ` 5  es              --/M      Spanish_(Spain)    roa/es`
fn parse_espeak_line(line: &str, source: &str) -> Option<VoiceInfo> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 || fields[0] == "Pty" || fields[0].parse::<u32>().is_err() {
        return None;
    }

    Some(VoiceInfo {
        name: fields[3].to_string(),
        language: Some(fields[1].to_string()),
        source: source.to_string(),
        duration: None,
    })
}

/// Find an executable on `PATH`, or accept an explicit path as-is.
pub fn find_program(bin: &str) -> Option<PathBuf> {
    if bin.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(bin);
        return path.is_file().then_some(path);
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(bin))
        .find(|candidate| candidate.is_file())
}

/// OS synthesizer backend.
pub struct SystemBackend {
    program: SystemProgram,
    bin: PathBuf,
}

impl SystemBackend {
    /// Create a backend for `program` at `bin`.
    pub fn new(program: SystemProgram, bin: PathBuf) -> Self {
        Self { program, bin }
    }

    /// Use the first installed program in [`SystemProgram::DETECTION_ORDER`].
    pub fn detect() -> Option<Self> {
        SystemProgram::DETECTION_ORDER.iter().find_map(|program| {
            find_program(program.binary()).map(|bin| {
                debug!("Detected {} at {}", program.binary(), bin.display());
                Self::new(*program, bin)
            })
        })
    }

    /// The program this backend runs.
    pub fn program(&self) -> SystemProgram {
        self.program
    }

    fn run(&self, args: &[OsString]) -> Result<Vec<u8>, BackendError> {
        let output = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                BackendError::CommandFailed(format!("{}: {e}", self.program.binary()))
            })?;

        if !output.status.success() {
            return Err(BackendError::CommandFailed(format!(
                "{} exited with {}: {}",
                self.program.binary(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(output.stdout)
    }
}

impl Backend for SystemBackend {
    fn kind(&self) -> EngineKind {
        EngineKind::System
    }

    fn name(&self) -> String {
        self.program.binary().to_string()
    }

    fn is_available(&self) -> bool {
        self.bin.is_file()
    }

    fn synthesize(&self, request: &SpeakRequest) -> Result<Vec<u8>, BackendError> {
        let out = tempfile::Builder::new()
            .prefix("voice-notify-")
            .suffix(".wav")
            .tempfile()?;

        let args = self.program.synth_args(request, out.path());
        debug!("Running {} with {} args", self.program.binary(), args.len());
        self.run(&args)?;

        let audio = std::fs::read(out.path())?;
        ensure_wav(audio)
    }

    fn list_voices(&self) -> Result<Vec<VoiceInfo>, BackendError> {
        let args: Vec<OsString> = self
            .program
            .list_args()
            .iter()
            .map(|arg| OsString::from(*arg))
            .collect();
        let stdout = self.run(&args)?;
        Ok(self.program.parse_voices(&String::from_utf8_lossy(&stdout)))
    }
}
