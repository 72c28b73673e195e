//! Top-level conversation orchestrator.
//!
//! Owns the transcript for the lifetime of one conversation view and
//! dispatches the two input modes - text submission and the voice toggle -
//! which are mutually exclusive at any instant. At most one submission or
//! voice session is in flight at a time, enforced with a single busy flag;
//! overlapping requests are rejected, never queued.

use thiserror::Error;
use tracing::{error, info};

use crate::core::chat::{self, ChatStream};
use crate::core::context::SessionContext;
use crate::core::transcript::Transcript;
use crate::core::voice::{VoiceError, VoicePipeline, VoiceState};

/// Opening assistant greeting for a fresh conversation.
pub const DEFAULT_GREETING: &str = "Hello! I'm your AI MedGuard Buffalo assistant. I'm here to \
     help with health questions, symptom information, and wellness advice. How can I assist you \
     today?";

/// Assistant turn appended when a response could not be produced.
pub const FALLBACK_ASSISTANT_MESSAGE: &str = "I'm sorry, I wasn't able to respond just now. \
     Please try sending your message again. For urgent concerns, always contact your healthcare \
     provider.";

/// Coarse activity state exposed for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    /// Ready for input.
    Idle,
    /// A request is being prepared or is on its way out (includes recording
    /// and transcribing a voice utterance).
    Sending,
    /// Assistant output is streaming in.
    Receiving,
    /// The reply is being synthesized or spoken aloud.
    Speaking,
}

/// Errors surfaced directly to the caller of the orchestrator.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Empty or whitespace-only input; the transcript is untouched.
    #[error("message is empty")]
    EmptyInput,

    /// An attempted overlapping submission; the transcript is untouched.
    #[error("another request is already in flight")]
    Busy,

    /// A voice stage failed before or after the conversation itself (device,
    /// transcription, synthesis). The transcript is left coherent.
    #[error(transparent)]
    Voice(#[from] VoiceError),
}

/// The public-facing entry point for one conversation view.
pub struct ChatOrchestrator {
    chat: Box<dyn ChatStream>,
    voice: VoicePipeline,
    transcript: Transcript,
    ctx: SessionContext,
    /// True while a text submission is in flight. Voice busy-ness lives in
    /// the pipeline's own state.
    busy: bool,
}

impl ChatOrchestrator {
    /// Create an orchestrator over a fresh transcript seeded with the
    /// product greeting.
    pub fn new(chat: Box<dyn ChatStream>, voice: VoicePipeline, ctx: SessionContext) -> Self {
        Self::with_transcript(chat, voice, ctx, Transcript::with_greeting(DEFAULT_GREETING))
    }

    /// Create an orchestrator over an existing transcript.
    pub fn with_transcript(
        chat: Box<dyn ChatStream>,
        voice: VoicePipeline,
        ctx: SessionContext,
        transcript: Transcript,
    ) -> Self {
        Self {
            chat,
            voice,
            transcript,
            ctx,
            busy: false,
        }
    }

    /// The conversation so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether any submission or voice session is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy || self.voice.is_active()
    }

    /// Activity state for rendering.
    pub fn state(&self) -> OrchestratorState {
        match self.voice.state() {
            VoiceState::Recording | VoiceState::Transcribing => return OrchestratorState::Sending,
            VoiceState::Conversing => return OrchestratorState::Receiving,
            VoiceState::Synthesizing | VoiceState::Playing => return OrchestratorState::Speaking,
            VoiceState::Idle => {}
        }
        if self.busy {
            // The streaming turn's type state says whether output has
            // started arriving.
            if self.transcript.last().is_some_and(|t| t.is_streaming()) {
                OrchestratorState::Receiving
            } else {
                OrchestratorState::Sending
            }
        } else {
            OrchestratorState::Idle
        }
    }

    /// Submit a typed message and stream the assistant's reply into the
    /// transcript.
    ///
    /// The user turn is appended optimistically before the request goes
    /// out. A transport or decode failure does not bubble up: the partial
    /// assistant turn (if any) is rolled back and a single fallback
    /// assistant turn explains the failure, leaving the orchestrator ready
    /// for the next submission.
    ///
    /// # Errors
    /// * [`OrchestratorError::EmptyInput`] for empty/whitespace-only text
    /// * [`OrchestratorError::Busy`] while another submission or a voice
    ///   session is in flight
    pub async fn submit_text(&mut self, text: &str) -> Result<(), OrchestratorError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(OrchestratorError::EmptyInput);
        }
        if self.is_busy() {
            return Err(OrchestratorError::Busy);
        }

        self.busy = true;
        self.transcript.push_user(text);
        info!(chars = text.len(), "text submission accepted");

        let result =
            chat::drive_completion(self.chat.as_ref(), &self.ctx, &mut self.transcript).await;
        if let Err(e) = result {
            // drive_completion already rolled the partial turn back; answer
            // with the fallback so the failure is visible in-conversation.
            error!(error = %e, "completion failed, appending fallback turn");
            self.transcript.push_assistant(FALLBACK_ASSISTANT_MESSAGE);
        }

        self.busy = false;
        Ok(())
    }

    /// Toggle the voice input mode.
    ///
    /// The first call starts recording; the next call stops it and drives
    /// the rest of the cycle (transcribe, converse, synthesize, play).
    /// Returns the voice state after the toggle.
    ///
    /// A completion failure mid-cycle is absorbed the same way as in
    /// [`Self::submit_text`]: fallback turn, ready state. Failures before
    /// the conversation (microphone, transcription) or after it
    /// (synthesis, playback) surface as [`OrchestratorError::Voice`] and
    /// leave the transcript coherent.
    ///
    /// # Errors
    /// * [`OrchestratorError::Busy`] while a text submission is in flight
    ///   or a voice cycle is past the recording stage
    pub async fn toggle_voice(&mut self) -> Result<VoiceState, OrchestratorError> {
        if self.busy {
            return Err(OrchestratorError::Busy);
        }

        match self.voice.state() {
            VoiceState::Idle => {
                self.voice.start_recording().await?;
            }
            VoiceState::Recording => {
                let result = self
                    .voice
                    .stop_and_respond(&self.ctx, self.chat.as_ref(), &mut self.transcript)
                    .await;
                match result {
                    Ok(_) => {}
                    Err(VoiceError::Completion(e)) => {
                        // The user turn is already committed; keep the
                        // conversation coherent with the fallback reply.
                        error!(error = %e, "voice completion failed, appending fallback turn");
                        self.transcript.push_assistant(FALLBACK_ASSISTANT_MESSAGE);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            // Mid-cycle; no queueing.
            _ => return Err(OrchestratorError::Busy),
        }

        Ok(self.voice.state())
    }
}
