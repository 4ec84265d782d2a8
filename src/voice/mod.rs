//! Voice management for voice cloning.
//!
//! Reference clips are WAV recordings of the voice to imitate. They are
//! registered under a name and sent to the neural backend when that name
//! is selected as the voice.

mod manager;

pub use manager::{ReferenceVoice, VoiceError, VoiceManager};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::VoiceInfo;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_clip(path: &Path, seconds: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..(8000 * seconds) {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    // ===========================================
    // VoiceManager tests
    // ===========================================

    #[test]
    fn test_voice_manager_default_directory() {
        let manager = VoiceManager::new().unwrap();
        let expected = dirs::home_dir()
            .unwrap()
            .join(".voice-notify")
            .join("voices");
        assert_eq!(manager.voices_dir(), expected);
    }

    #[test]
    fn test_voice_manager_custom_directory() {
        let custom_path = PathBuf::from("/tmp/custom-voices");
        let manager = VoiceManager::with_dir(custom_path.clone());
        assert_eq!(manager.voices_dir(), custom_path);
    }

    #[test]
    fn test_voice_manager_list_empty() {
        let temp_dir = TempDir::new().unwrap();
        let manager = VoiceManager::with_dir(temp_dir.path().join("voices"));

        assert!(manager.list_references().unwrap().is_empty());
    }

    #[test]
    fn test_voice_manager_add_and_resolve() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("sample.wav");
        write_clip(&clip, 2);
        let manager = VoiceManager::with_dir(temp_dir.path().join("voices"));

        let voice = manager.add_reference("narrator", &clip).unwrap();

        assert_eq!(voice.name, "narrator");
        assert_eq!(voice.duration, Some(2.0));
        assert_eq!(manager.reference_path("narrator"), Some(voice.path));
    }

    #[test]
    fn test_voice_manager_add_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("sample.wav");
        write_clip(&clip, 1);
        let manager = VoiceManager::with_dir(temp_dir.path().join("voices"));

        manager.add_reference("narrator", &clip).unwrap();
        let result = manager.add_reference("narrator", &clip);

        assert!(matches!(result.unwrap_err(), VoiceError::AlreadyExists(_)));
    }

    #[test]
    fn test_voice_manager_rejects_non_wav_clip() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("notes.txt");
        std::fs::write(&clip, "not audio").unwrap();
        let manager = VoiceManager::with_dir(temp_dir.path().join("voices"));

        let result = manager.add_reference("narrator", &clip);

        assert!(matches!(
            result.unwrap_err(),
            VoiceError::InvalidClip { .. }
        ));
        assert!(manager.reference_path("narrator").is_none());
    }

    #[test]
    fn test_voice_manager_delete_reference() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("sample.wav");
        write_clip(&clip, 1);
        let manager = VoiceManager::with_dir(temp_dir.path().join("voices"));

        manager.add_reference("to_delete", &clip).unwrap();
        manager.delete_reference("to_delete").unwrap();

        assert!(manager.reference_path("to_delete").is_none());
        assert!(matches!(
            manager.delete_reference("to_delete").unwrap_err(),
            VoiceError::NotFound(_)
        ));
    }

    #[test]
    fn test_voice_manager_list_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("sample.wav");
        write_clip(&clip, 1);
        let manager = VoiceManager::with_dir(temp_dir.path().join("voices"));

        manager.add_reference("zoe", &clip).unwrap();
        manager.add_reference("ana", &clip).unwrap();
        std::fs::write(manager.voices_dir().join("readme.txt"), "ignored").unwrap();

        let voices = manager.list_references().unwrap();

        let names: Vec<&str> = voices.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["ana", "zoe"]);
    }

    #[test]
    fn test_voice_manager_validates_name() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("sample.wav");
        write_clip(&clip, 1);
        let manager = VoiceManager::with_dir(temp_dir.path().join("voices"));

        assert!(matches!(
            manager.add_reference("../evil", &clip).unwrap_err(),
            VoiceError::InvalidName(_)
        ));
        assert!(manager.reference_path("../evil").is_none());
        assert!(manager.reference_path("").is_none());
    }

    #[test]
    fn test_reference_voice_into_voice_info() {
        let info: VoiceInfo = ReferenceVoice {
            name: "narrator".to_string(),
            path: PathBuf::from("/tmp/narrator.wav"),
            duration: Some(4.5),
        }
        .into();

        assert_eq!(info.name, "narrator");
        assert_eq!(info.source, "reference");
        assert_eq!(info.duration, Some(4.5));
    }
}
