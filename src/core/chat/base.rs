//! Chat completion trait abstraction and shared types.

use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use thiserror::Error;

use crate::core::context::SessionContext;
use crate::core::transcript::Turn;
use crate::core::transport::TransportError;

/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default completion model.
pub const DEFAULT_CHAT_MODEL: &str = "meta-llama/llama-4-scout:free";

/// Persona prepended to every completion request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI MedGuard Buffalo assistant. You help with \
     health questions, symptom information, and wellness advice. Always remind users that you're \
     not a replacement for professional medical advice.";

/// Errors surfaced by a chat completion provider.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider rejected the credentials.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The request could not be sent or the stream failed mid-flight.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The provider answered with an error payload.
    #[error("provider error: {0}")]
    Provider(String),
}

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Lazy stream of incremental assistant content deltas.
///
/// Ends after the terminal wire event; a mid-flight failure surfaces as one
/// `Err` item and then the stream is done.
pub type DeltaStream = Pin<Box<dyn Stream<Item = ChatResult<String>> + Send>>;

/// Configuration for a chat completion provider.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Chat completions URL. The production deployment points this at the
    /// product's own backend function; any OpenAI-compatible endpoint works.
    pub endpoint: String,
    /// Provider API key. May be empty when the session token is the
    /// credential (backend-function deployments).
    pub api_key: String,
    /// Completion model identifier.
    pub model: String,
    /// System prompt prepended to the submitted turns.
    pub system_prompt: String,
    /// Bound on connection establishment.
    pub connect_timeout: Duration,
    /// Bound on the quiet gap between stream chunks.
    pub idle_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            api_key: String::new(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(120),
        }
    }
}

impl ChatConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        crate::utils::validate_endpoint(&self.endpoint)?;
        if self.model.is_empty() {
            return Err("chat model must not be empty".to_string());
        }
        Ok(())
    }
}

/// Chat completion collaborator.
///
/// Accepts the ordered transcript turns and returns a lazy delta stream.
/// Implementations sequence and decode; the language model itself is an
/// external service.
#[async_trait::async_trait]
pub trait ChatStream: Send + Sync {
    /// Open a streaming completion for the given turns.
    ///
    /// The returned stream yields content deltas in arrival order and ends
    /// at the terminal event. Transport failures surface as `Err` items.
    async fn stream_completion(
        &self,
        ctx: &SessionContext,
        turns: &[Turn],
    ) -> ChatResult<DeltaStream>;

    /// Human-readable provider description for logs.
    fn provider_info(&self) -> &'static str;
}
