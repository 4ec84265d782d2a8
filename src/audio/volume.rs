//! PCM volume scaling.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavWriter};

use super::AudioError;

/// Volumes this close to 1.0 leave the audio untouched.
const UNITY_EPSILON: f32 = 1e-3;

/// Scale every sample of a WAV file by `volume`.
///
/// Integer samples are clamped to their bit depth, float samples to
/// `-1.0..=1.0`.
pub fn scale_volume(wav: &[u8], volume: f32) -> Result<Vec<u8>, AudioError> {
    if (volume - 1.0).abs() < UNITY_EPSILON {
        return Ok(wav.to_vec());
    }

    let mut reader = WavReader::new(Cursor::new(wav))?;
    let spec = reader.spec();
    let mut out = Cursor::new(Vec::with_capacity(wav.len()));

    {
        let mut writer = WavWriter::new(&mut out, spec)?;

        match spec.sample_format {
            SampleFormat::Float => {
                for sample in reader.samples::<f32>() {
                    writer.write_sample((sample? * volume).clamp(-1.0, 1.0))?;
                }
            }
            SampleFormat::Int => {
                let max = ((1i64 << (spec.bits_per_sample - 1)) - 1) as f32;
                let min = -max - 1.0;
                for sample in reader.samples::<i32>() {
                    let scaled = (sample? as f32 * volume).round().clamp(min, max);
                    writer.write_sample(scaled as i32)?;
                }
            }
        }

        writer.finalize()?;
    }

    Ok(out.into_inner())
}
