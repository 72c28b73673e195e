//! Response wire types and WAV assembly for the Whisper transcription API.

use serde::Deserialize;

/// `POST /audio/transcriptions` JSON response.
#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

/// Error body shape used by the provider.
#[derive(Debug, Deserialize)]
pub struct SttErrorResponse {
    pub error: SttErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct SttErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

/// WAV container assembly for raw PCM capture buffers.
pub mod wav {
    use std::io::Cursor;

    /// Wrap 16-bit signed little-endian PCM in a WAV container.
    ///
    /// The transcription API takes a file upload; the capture device hands
    /// us bare samples, so the header is produced here on the way out.
    pub fn encode(pcm: &[u8], sample_rate: u32, channels: u16) -> Result<Vec<u8>, hound::Error> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for sample in pcm.chunks_exact(2) {
                writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
            }
            writer.finalize()?;
        }
        Ok(cursor.into_inner())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_wav_header_and_length() {
            let pcm = vec![0u8; 3200]; // 100ms at 16kHz mono
            let wav = encode(&pcm, 16_000, 1).unwrap();

            assert_eq!(&wav[0..4], b"RIFF");
            assert_eq!(&wav[8..12], b"WAVE");
            assert_eq!(wav.len(), 44 + pcm.len());
        }

        #[test]
        fn test_samples_roundtrip() {
            let samples: Vec<i16> = vec![0, 1000, -1000, i16::MAX, i16::MIN];
            let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

            let wav = encode(&pcm, 16_000, 1).unwrap();
            let mut reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
            let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
            assert_eq!(decoded, samples);
        }
    }
}
