//! Text-to-speech trait abstraction and shared types.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

use crate::core::context::SessionContext;

/// Errors surfaced by a text-to-speech provider.
#[derive(Debug, Error)]
pub enum TtsError {
    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider rejected the credentials.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with an error payload.
    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

/// Result type for TTS operations.
pub type TtsResult<T> = Result<T, TtsError>;

/// One synthesized speech payload, ready for playback.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// Encoded audio bytes as returned by the provider.
    pub data: Bytes,
    /// MIME type of the payload (e.g. `audio/mpeg`).
    pub mime_type: String,
}

impl SynthesizedAudio {
    pub fn new(data: Bytes, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Configuration shared by text-to-speech providers.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Provider API base URL.
    pub base_url: String,
    /// Provider API key.
    pub api_key: String,
    /// Voice identifier.
    pub voice_id: String,
    /// Synthesis model identifier.
    pub model_id: String,
    /// Voice stability (0.0 to 1.0).
    pub stability: f32,
    /// Voice similarity boost (0.0 to 1.0).
    pub similarity_boost: f32,
    /// Bound on the whole synthesis round trip.
    pub request_timeout: Duration,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: super::elevenlabs::ELEVENLABS_API_URL.to_string(),
            api_key: String::new(),
            voice_id: String::new(),
            model_id: "eleven_turbo_v2".to_string(),
            stability: 0.7,
            similarity_boost: 0.9,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl TtsConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        crate::utils::validate_endpoint(&self.base_url)?;
        if self.voice_id.is_empty() {
            return Err("voice id must not be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.stability) {
            return Err(format!("stability {} out of range 0.0..=1.0", self.stability));
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err(format!(
                "similarity boost {} out of range 0.0..=1.0",
                self.similarity_boost
            ));
        }
        Ok(())
    }
}

/// Text-to-speech collaborator.
///
/// Accepts assistant text and returns one synthesized audio payload.
/// Synthesis itself is an external service.
#[async_trait::async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize speech for the given text.
    async fn synthesize(&self, ctx: &SessionContext, text: &str) -> TtsResult<SynthesizedAudio>;

    /// Human-readable provider description for logs.
    fn provider_info(&self) -> &'static str;
}
