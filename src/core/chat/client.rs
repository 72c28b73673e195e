//! OpenAI-compatible streaming chat client.
//!
//! Talks to any `/chat/completions` endpoint that answers a `stream: true`
//! request with server-sent events - OpenRouter in the default deployment,
//! or the product's own backend function. The response body is decoded by
//! composing the transport line reader with the event parser; each content
//! delta is yielded as it arrives.

use async_stream::try_stream;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::base::{ChatConfig, ChatError, ChatResult, ChatStream, DeltaStream};
use super::messages::{CompletionRequest, ProviderErrorResponse};
use crate::core::context::SessionContext;
use crate::core::transcript::Turn;
use crate::core::transport::{StreamEvent, TransportError, line_stream, parse_event};

/// Streaming chat client for OpenAI-compatible completion endpoints.
pub struct OpenRouterChat {
    config: ChatConfig,
    /// HTTP client, reused across requests for connection pooling.
    http_client: Client,
}

impl OpenRouterChat {
    /// Create a new client from configuration.
    pub fn new(config: ChatConfig) -> ChatResult<Self> {
        config.validate().map_err(ChatError::Configuration)?;

        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ChatError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Resolve the bearer credential for this call.
    ///
    /// A configured provider key wins; otherwise the session token is the
    /// credential (backend-function deployments authenticate the patient,
    /// not this client).
    fn bearer<'a>(&'a self, ctx: &'a SessionContext) -> Option<&'a str> {
        if !self.config.api_key.is_empty() {
            Some(&self.config.api_key)
        } else {
            ctx.access_token.as_deref()
        }
    }
}

#[async_trait::async_trait]
impl ChatStream for OpenRouterChat {
    async fn stream_completion(
        &self,
        ctx: &SessionContext,
        turns: &[Turn],
    ) -> ChatResult<DeltaStream> {
        let request =
            CompletionRequest::streaming(&self.config.model, &self.config.system_prompt, turns);

        debug!(
            model = %self.config.model,
            turns = turns.len(),
            "opening chat completion stream"
        );

        let mut builder = self.http_client.post(&self.config.endpoint).json(&request);
        if let Some(token) = self.bearer(ctx) {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Stream(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ProviderErrorResponse>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => format!("HTTP {status}: {body}"),
            };
            return Err(if status.as_u16() == 401 {
                ChatError::AuthenticationFailed(message)
            } else {
                ChatError::Provider(message)
            });
        }

        let idle_timeout = self.config.idle_timeout;
        let lines = line_stream(response.bytes_stream());

        let deltas = try_stream! {
            let mut lines = std::pin::pin!(lines);
            let mut skipped = 0usize;

            loop {
                let next = timeout(idle_timeout, lines.next())
                    .await
                    .map_err(|_| TransportError::Timeout(idle_timeout))?;
                let Some(line) = next else {
                    // Connection closed without the sentinel; the events we
                    // already have are complete lines, so treat it as end of
                    // stream rather than discarding them.
                    debug!("stream closed without terminal event");
                    break;
                };
                let line = line?;

                match parse_event(&line) {
                    Ok(Some(StreamEvent::Delta(content))) => yield content,
                    Ok(Some(StreamEvent::Done)) => {
                        info!(skipped, "chat completion stream finished");
                        break;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        // Best-effort decoding: one malformed event must not
                        // abort the stream.
                        skipped += 1;
                        warn!(error = %e, "skipping malformed stream event");
                    }
                }
            }
        };

        Ok(Box::pin(deltas))
    }

    fn provider_info(&self) -> &'static str {
        "OpenAI-compatible streaming chat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenRouterChat::new(ChatConfig::default()).unwrap();
        assert_eq!(client.provider_info(), "OpenAI-compatible streaming chat");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = ChatConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            OpenRouterChat::new(config),
            Err(ChatError::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let config = ChatConfig {
            model: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            OpenRouterChat::new(config),
            Err(ChatError::Configuration(_))
        ));
    }

    #[test]
    fn test_bearer_prefers_provider_key() {
        let client = OpenRouterChat::new(ChatConfig {
            api_key: "sk-provider".to_string(),
            ..Default::default()
        })
        .unwrap();
        let ctx = SessionContext::authenticated("patient-1", "session-token");
        assert_eq!(client.bearer(&ctx), Some("sk-provider"));
    }

    #[test]
    fn test_bearer_falls_back_to_session_token() {
        let client = OpenRouterChat::new(ChatConfig::default()).unwrap();
        let ctx = SessionContext::authenticated("patient-1", "session-token");
        assert_eq!(client.bearer(&ctx), Some("session-token"));
        assert_eq!(client.bearer(&SessionContext::anonymous()), None);
    }
}
