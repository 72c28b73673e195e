//! Transient state of one record-transcribe-respond-speak cycle.

use uuid::Uuid;

use crate::core::audio::CapturedAudio;
use crate::core::tts::SynthesizedAudio;

/// State accumulated across the stages of one voice cycle.
///
/// Created when recording starts and dropped when the cycle ends, whether
/// it completed or failed. Audio buffers are never retained across
/// sessions.
#[derive(Debug, Default)]
pub struct VoiceSession {
    id: Uuid,
    /// Finalized microphone capture, set when recording stops.
    pub captured_audio: Option<CapturedAudio>,
    /// Recognized text, set after transcription.
    pub transcribed_text: Option<String>,
    /// Final assistant reply, set after the completion stream ends.
    pub assistant_text: Option<String>,
    /// Synthesized speech, set after synthesis.
    pub synthesized_audio: Option<SynthesizedAudio>,
}

impl VoiceSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Default::default()
        }
    }

    /// Session identifier for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }
}
