//! Voice pipeline coordinator.
//!
//! One linear state machine per user utterance:
//!
//! ```text
//! Idle -> Recording -> Transcribing -> Conversing -> Synthesizing -> Playing -> Idle
//! ```
//!
//! A failure at any stage reports the error, drops the session, and returns
//! the machine to `Idle`; the transcript is never left with partial state
//! (no user turn from a failed transcription, no half-written assistant
//! turn after a failed completion). Only one session may be active at a
//! time - an overlapping start is rejected, not queued.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::session::VoiceSession;
use crate::core::audio::{AudioError, CaptureDevice, PlaybackDevice};
use crate::core::chat::{self, ChatError, ChatStream};
use crate::core::context::SessionContext;
use crate::core::stt::{SpeechToText, SttError};
use crate::core::transcript::Transcript;
use crate::core::tts::{TextToSpeech, TtsError};

/// Stage the coordinator is currently in.
///
/// There is no stored error state: a failed stage surfaces its
/// [`VoiceError`] to the caller, and the machine is back in `Idle` by the
/// time the call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Recording,
    Transcribing,
    Conversing,
    Synthesizing,
    Playing,
}

/// How a completed cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceOutcome {
    /// Full cycle: the reply was spoken to completion.
    Spoken,
    /// The cycle ended early without touching the transcript - nothing was
    /// captured, or the utterance transcribed to nothing.
    Discarded,
}

/// Errors surfaced by the voice pipeline, tagged by failing stage.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// A session is already mid-flight; overlapping starts are rejected.
    #[error("a voice session is already active")]
    AlreadyActive,

    /// There is nothing to stop.
    #[error("no recording in progress")]
    NotRecording,

    /// Capture or playback device failure (includes microphone permission
    /// denial).
    #[error("audio device error: {0}")]
    Audio(#[from] AudioError),

    /// Speech-to-text failure. No user turn has been committed.
    #[error("transcription error: {0}")]
    Transcription(#[from] SttError),

    /// Completion stream failure. The user turn is committed; any partial
    /// assistant turn has been rolled back.
    #[error("completion error: {0}")]
    Completion(#[from] ChatError),

    /// Text-to-speech failure. The assistant turn is committed and final.
    #[error("synthesis error: {0}")]
    Synthesis(#[from] TtsError),
}

/// Result type for voice pipeline operations.
pub type VoiceResult<T> = Result<T, VoiceError>;

/// Sequences one voice interaction across the audio devices, the
/// transcription service, the chat completion stream, and the synthesis
/// service.
///
/// The coordinator owns the devices and speech services but not the
/// transcript or the chat collaborator - those belong to the orchestrator,
/// which lends them to [`VoicePipeline::stop_and_respond`] so text and
/// voice input share one conversation.
pub struct VoicePipeline {
    capture: Box<dyn CaptureDevice>,
    stt: Box<dyn SpeechToText>,
    tts: Box<dyn TextToSpeech>,
    playback: Box<dyn PlaybackDevice>,
    state: VoiceState,
    session: Option<VoiceSession>,
}

impl VoicePipeline {
    pub fn new(
        capture: Box<dyn CaptureDevice>,
        stt: Box<dyn SpeechToText>,
        tts: Box<dyn TextToSpeech>,
        playback: Box<dyn PlaybackDevice>,
    ) -> Self {
        Self {
            capture,
            stt,
            tts,
            playback,
            state: VoiceState::Idle,
            session: None,
        }
    }

    /// Current stage of the machine.
    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// Whether a session is mid-flight.
    pub fn is_active(&self) -> bool {
        self.state != VoiceState::Idle
    }

    /// `Idle -> Recording`: begin audio capture.
    ///
    /// Rejected with [`VoiceError::AlreadyActive`] while any session is
    /// mid-flight; there is no queueing.
    pub async fn start_recording(&mut self) -> VoiceResult<()> {
        if self.state != VoiceState::Idle {
            return Err(VoiceError::AlreadyActive);
        }

        let session = VoiceSession::new();
        info!(session = %session.id(), "voice session started");

        if let Err(e) = self.capture.start().await {
            warn!(session = %session.id(), error = %e, "failed to start capture");
            return Err(e.into());
        }

        self.session = Some(session);
        self.state = VoiceState::Recording;
        Ok(())
    }

    /// Drive the rest of the cycle: `Recording -> ... -> Idle`.
    ///
    /// Stops capture, transcribes the utterance, appends the user turn,
    /// streams the completion into `transcript`, synthesizes the reply, and
    /// plays it. Whatever happens, the machine is back in `Idle` and the
    /// session (with its audio buffers) is dropped when this returns.
    pub async fn stop_and_respond(
        &mut self,
        ctx: &SessionContext,
        chat: &dyn ChatStream,
        transcript: &mut Transcript,
    ) -> VoiceResult<VoiceOutcome> {
        if self.state != VoiceState::Recording {
            return Err(VoiceError::NotRecording);
        }
        let Some(mut session) = self.session.take() else {
            return Err(VoiceError::NotRecording);
        };

        let result = self.run_cycle(&mut session, ctx, chat, transcript).await;

        // Teardown is unconditional: the session and its audio buffers are
        // scoped to one cycle, success or failure.
        self.state = VoiceState::Idle;
        match &result {
            Ok(outcome) => info!(session = %session.id(), ?outcome, "voice session ended"),
            Err(e) => warn!(session = %session.id(), error = %e, "voice session failed"),
        }

        result
    }

    async fn run_cycle(
        &mut self,
        session: &mut VoiceSession,
        ctx: &SessionContext,
        chat: &dyn ChatStream,
        transcript: &mut Transcript,
    ) -> VoiceResult<VoiceOutcome> {
        // Recording -> Transcribing
        self.state = VoiceState::Transcribing;
        let captured = self.capture.stop().await?;

        if captured.is_empty() {
            // Start/stop with nothing in between: not an error, and the
            // transcription service is never invoked on empty audio.
            debug!("empty capture, discarding session");
            return Ok(VoiceOutcome::Discarded);
        }

        debug!(duration_ms = captured.duration_ms(), "transcribing utterance");
        session.captured_audio = Some(captured.clone());
        let text = self.stt.transcribe(ctx, &captured).await?;

        let text = text.trim().to_string();
        if text.is_empty() {
            // Silence recognized as nothing; treat like an empty capture.
            debug!("empty transcription, discarding session");
            return Ok(VoiceOutcome::Discarded);
        }
        session.transcribed_text = Some(text.clone());

        // Transcribing -> Conversing: the user turn is committed only now,
        // after transcription succeeded.
        self.state = VoiceState::Conversing;
        transcript.push_user(text);
        let Some(assistant_text) = chat::drive_completion(chat, ctx, transcript).await? else {
            // The stream ended without producing any content; there is
            // nothing to speak.
            debug!("completion produced no content, skipping synthesis");
            return Ok(VoiceOutcome::Discarded);
        };
        session.assistant_text = Some(assistant_text.clone());

        // Conversing -> Synthesizing
        self.state = VoiceState::Synthesizing;
        let audio = self.tts.synthesize(ctx, &assistant_text).await?;
        session.synthesized_audio = Some(audio.clone());

        // Synthesizing -> Playing
        self.state = VoiceState::Playing;
        self.playback.play(&audio).await?;

        Ok(VoiceOutcome::Spoken)
    }
}
