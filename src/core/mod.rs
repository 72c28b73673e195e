//! Conversational core: transport, transcript, collaborators, and the
//! orchestration layers that sequence them.

pub mod audio;
pub mod chat;
pub mod context;
pub mod orchestrator;
pub mod stt;
pub mod transcript;
pub mod transport;
pub mod tts;
pub mod voice;

// Re-export commonly used types for convenience
pub use audio::{AudioError, CaptureDevice, CapturedAudio, PlaybackDevice};
pub use chat::{
    ChatConfig, ChatError, ChatResult, ChatStream, DeltaStream, OpenRouterChat, drive_completion,
};
pub use context::SessionContext;
pub use orchestrator::{
    ChatOrchestrator, DEFAULT_GREETING, FALLBACK_ASSISTANT_MESSAGE, OrchestratorError,
    OrchestratorState,
};
pub use stt::{SpeechToText, SttConfig, SttError, WhisperStt};
pub use transcript::{Role, Transcript, Turn, TurnContent};
pub use transport::{DecodeError, StreamEvent, TransportError, line_stream, parse_event};
pub use tts::{ElevenLabsTts, SynthesizedAudio, TextToSpeech, TtsConfig, TtsError};
pub use voice::{VoiceError, VoiceOutcome, VoicePipeline, VoiceResult, VoiceSession, VoiceState};
