//! Request wire types for the chat completions API.

use serde::{Deserialize, Serialize};

use crate::core::transcript::Turn;

/// `POST /chat/completions` request body.
#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub stream: bool,
}

impl CompletionRequest {
    /// Build a streaming request: system prompt first, then the transcript
    /// turns in order.
    pub fn streaming(model: &str, system_prompt: &str, turns: &[Turn]) -> Self {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(WireMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        });
        messages.extend(turns.iter().map(WireMessage::from));

        Self {
            model: model.to_string(),
            messages,
            stream: true,
        }
    }
}

/// One `{role, content}` message on the wire.
#[derive(Debug, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl From<&Turn> for WireMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.as_str().to_string(),
            content: turn.text().to_string(),
        }
    }
}

/// Error body shape used by OpenAI-compatible providers.
#[derive(Debug, Deserialize)]
pub struct ProviderErrorResponse {
    pub error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Transcript;

    #[test]
    fn test_system_prompt_comes_first() {
        let mut transcript = Transcript::with_greeting("Hi");
        transcript.push_user("What is ibuprofen?");

        let request = CompletionRequest::streaming("test-model", "persona", transcript.turns());

        assert!(request.stream);
        assert_eq!(request.model, "test-model");
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, "persona");
        assert_eq!(request.messages[1].role, "assistant");
        assert_eq!(request.messages[2].role, "user");
        assert_eq!(request.messages[2].content, "What is ibuprofen?");
    }

    #[test]
    fn test_request_serializes_to_expected_shape() {
        let request = CompletionRequest::streaming("m", "s", &[]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["stream"], serde_json::json!(true));
        assert_eq!(value["messages"][0]["role"], serde_json::json!("system"));
    }

    #[test]
    fn test_provider_error_body_parses() {
        let body = r#"{"error":{"message":"rate limited","type":"rate_limit"}}"#;
        let parsed: ProviderErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "rate limited");
        assert_eq!(parsed.error.error_type.as_deref(), Some("rate_limit"));
    }
}
