//! Speech-to-text trait abstraction and shared types.

use std::time::Duration;

use thiserror::Error;

use crate::core::audio::CapturedAudio;
use crate::core::context::SessionContext;

/// Errors surfaced by a speech-to-text provider.
#[derive(Debug, Error)]
pub enum SttError {
    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider rejected the credentials.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The captured audio could not be packaged for upload.
    #[error("audio processing error: {0}")]
    AudioProcessing(String),

    /// The provider answered with an error payload.
    #[error("transcription failed: {0}")]
    Transcription(String),
}

/// Result type for STT operations.
pub type SttResult<T> = Result<T, SttError>;

/// Configuration shared by speech-to-text providers.
#[derive(Debug, Clone)]
pub struct SttConfig {
    /// Transcription endpoint URL.
    pub endpoint: String,
    /// Provider API key.
    pub api_key: String,
    /// Transcription model identifier.
    pub model: String,
    /// ISO language hint; empty means autodetect.
    pub language: String,
    /// Bound on the whole transcription round trip.
    pub request_timeout: Duration,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            endpoint: super::whisper::WHISPER_STT_URL.to_string(),
            api_key: String::new(),
            model: "whisper-1".to_string(),
            language: "en".to_string(),
            // Whisper can take time for long utterances
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl SttConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        crate::utils::validate_endpoint(&self.endpoint)?;
        if self.model.is_empty() {
            return Err("transcription model must not be empty".to_string());
        }
        Ok(())
    }
}

/// Speech-to-text collaborator.
///
/// Accepts one finalized captured-audio payload and returns recognized
/// text. Recognition itself is an external service.
#[async_trait::async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe one utterance.
    async fn transcribe(&self, ctx: &SessionContext, audio: &CapturedAudio) -> SttResult<String>;

    /// Human-readable provider description for logs.
    fn provider_info(&self) -> &'static str;
}
