//! Audio device seams: microphone capture and playback.
//!
//! Real audio hardware is an external collaborator. The core defines the
//! device contracts and the PCM payload type that moves between them; an
//! embedding application supplies implementations for its platform. Buffers
//! are scoped to one voice session and dropped when it ends.

use bytes::Bytes;
use thiserror::Error;

use crate::core::tts::SynthesizedAudio;

/// Errors surfaced by audio devices.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The capture device could not be acquired (e.g. microphone denied).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The device failed while capturing.
    #[error("capture device error: {0}")]
    Device(String),

    /// The playback device failed.
    #[error("playback error: {0}")]
    Playback(String),
}

/// Result type for audio device operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// One finalized utterance of captured PCM audio.
///
/// Samples are 16-bit signed little-endian.
#[derive(Debug, Clone, Default)]
pub struct CapturedAudio {
    pub pcm: Bytes,
    pub sample_rate: u32,
    pub channels: u16,
}

impl CapturedAudio {
    pub fn new(pcm: Bytes, sample_rate: u32, channels: u16) -> Self {
        Self {
            pcm,
            sample_rate,
            channels,
        }
    }

    /// Whether any samples were captured at all.
    pub fn is_empty(&self) -> bool {
        self.pcm.is_empty()
    }

    /// Duration of the captured audio in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        let bytes_per_second = self.sample_rate as u64 * self.channels as u64 * 2;
        if bytes_per_second == 0 {
            return 0;
        }
        self.pcm.len() as u64 * 1000 / bytes_per_second
    }
}

/// Microphone capture collaborator with start/stop semantics.
///
/// `stop` yields the finalized utterance. Failing to obtain the device
/// surfaces [`AudioError::PermissionDenied`].
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Begin capturing audio.
    async fn start(&mut self) -> AudioResult<()>;

    /// Stop capturing and return the finalized audio payload.
    async fn stop(&mut self) -> AudioResult<CapturedAudio>;
}

/// Audio playback collaborator.
#[async_trait::async_trait]
pub trait PlaybackDevice: Send + Sync {
    /// Play the synthesized audio to completion.
    async fn play(&mut self, audio: &SynthesizedAudio) -> AudioResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_capture() {
        let audio = CapturedAudio::default();
        assert!(audio.is_empty());
        assert_eq!(audio.duration_ms(), 0);
    }

    #[test]
    fn test_duration_for_16khz_mono() {
        // 16kHz, 16-bit mono = 32,000 bytes per second
        let audio = CapturedAudio::new(Bytes::from(vec![0u8; 32_000]), 16_000, 1);
        assert_eq!(audio.duration_ms(), 1000);
    }
}
