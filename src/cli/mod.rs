//! CLI argument parsing and validation.

mod args;

pub use args::{Args, EngineChoice, SPEED_RANGE, VoiceSpec, VoiceSpecParseError};

#[cfg(test)]
mod tests {
    use super::args::parse_speed;
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    // ===========================================
    // VoiceSpec::parse tests
    // ===========================================

    #[test]
    fn test_parse_voice_spec_valid() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        let input = format!("narrator={path}");

        let spec = VoiceSpec::parse(&input).unwrap();

        assert_eq!(spec.name, "narrator");
        assert_eq!(spec.clip_path, PathBuf::from(path));
    }

    #[test]
    fn test_parse_voice_spec_missing_separator() {
        let result = VoiceSpec::parse("narrator clip.wav");

        assert!(matches!(
            result.unwrap_err(),
            VoiceSpecParseError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_parse_voice_spec_empty_name() {
        let temp_file = NamedTempFile::new().unwrap();
        let input = format!("  ={}", temp_file.path().display());

        let result = VoiceSpec::parse(&input);

        assert!(matches!(result.unwrap_err(), VoiceSpecParseError::EmptyName));
    }

    #[test]
    fn test_parse_voice_spec_file_not_found() {
        let result = VoiceSpec::parse("narrator=/nonexistent/clip.wav");

        assert!(matches!(
            result.unwrap_err(),
            VoiceSpecParseError::FileNotFound(_)
        ));
    }

    #[test]
    fn test_parse_voice_spec_trims_whitespace() {
        let temp_file = NamedTempFile::new().unwrap();
        let input = format!("  narrator  =  {}  ", temp_file.path().display());

        let spec = VoiceSpec::parse(&input).unwrap();

        assert_eq!(spec.name, "narrator");
        assert_eq!(spec.clip_path, temp_file.path());
    }

    // ===========================================
    // Speed parsing tests
    // ===========================================

    #[test]
    fn test_parse_speed_accepts_range_bounds() {
        assert_eq!(parse_speed("0.5").unwrap(), 0.5);
        assert_eq!(parse_speed("2.0").unwrap(), 2.0);
        assert_eq!(parse_speed(" 1.25 ").unwrap(), 1.25);
    }

    #[test]
    fn test_parse_speed_rejects_out_of_range() {
        assert!(parse_speed("0.1").is_err());
        assert!(parse_speed("3").is_err());
    }

    #[test]
    fn test_parse_speed_rejects_garbage() {
        assert!(parse_speed("fast").is_err());
    }

    // ===========================================
    // Args tests
    // ===========================================

    #[test]
    fn test_args_text_and_engine() {
        let args = Args::try_parse_from([
            "voice-notify",
            "--text",
            "Build finished",
            "--engine",
            "system",
            "--voice",
            "Monica",
        ])
        .unwrap();

        assert_eq!(args.text.as_deref(), Some("Build finished"));
        assert_eq!(args.engine, Some(EngineChoice::System));
        assert_eq!(args.voice.as_deref(), Some("Monica"));
        assert!(!args.list_voices);
    }

    #[test]
    fn test_args_rejects_unknown_engine() {
        let result = Args::try_parse_from(["voice-notify", "--engine", "piper"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_speed_validated() {
        let result = Args::try_parse_from(["voice-notify", "-t", "hi", "--speed", "9"]);
        assert!(result.is_err());
    }

    // ===========================================
    // EngineChoice tests
    // ===========================================

    #[test]
    fn test_engine_choice_default_is_auto() {
        assert_eq!(EngineChoice::default(), EngineChoice::Auto);
    }

    #[test]
    fn test_engine_choice_as_str() {
        assert_eq!(EngineChoice::Auto.as_str(), "auto");
        assert_eq!(EngineChoice::Neural.as_str(), "neural");
        assert_eq!(EngineChoice::System.as_str(), "system");
    }

    #[test]
    fn test_engine_choice_deserializes_lowercase() {
        let choice: EngineChoice = serde_json::from_str("\"neural\"").unwrap();
        assert_eq!(choice, EngineChoice::Neural);
    }
}
