//! Whisper-style speech-to-text client.
//!
//! Whisper is a batch REST API, not a streaming one: the voice pipeline
//! hands over one finalized utterance, this client wraps it in a WAV
//! container, uploads it as a multipart form, and parses the recognized
//! text out of the JSON response.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use super::super::base::{SpeechToText, SttConfig, SttError, SttResult};
use super::messages::{SttErrorResponse, TranscriptionResponse, wav};
use crate::core::audio::CapturedAudio;
use crate::core::context::SessionContext;

/// Whisper transcription client.
#[derive(Debug)]
pub struct WhisperStt {
    config: SttConfig,
    /// HTTP client, reused across requests for connection pooling.
    http_client: Client,
}

impl WhisperStt {
    /// Create a new client from configuration.
    pub fn new(config: SttConfig) -> SttResult<Self> {
        if config.api_key.is_empty() {
            return Err(SttError::AuthenticationFailed(
                "API key is required for Whisper transcription".to_string(),
            ));
        }
        config.validate().map_err(SttError::Configuration)?;

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SttError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait::async_trait]
impl SpeechToText for WhisperStt {
    async fn transcribe(&self, _ctx: &SessionContext, audio: &CapturedAudio) -> SttResult<String> {
        let wav_data = wav::encode(&audio.pcm, audio.sample_rate, audio.channels)
            .map_err(|e| SttError::AudioProcessing(format!("WAV assembly failed: {e}")))?;

        debug!(
            bytes = wav_data.len(),
            duration_ms = audio.duration_ms(),
            "uploading utterance for transcription"
        );

        let file_part = Part::bytes(wav_data)
            .file_name("utterance.wav")
            .mime_str("audio/wav")
            .map_err(|e| SttError::Configuration(format!("invalid MIME type: {e}")))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone());
        if !self.config.language.is_empty() {
            form = form.text("language", self.config.language.clone());
        }

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| SttError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SttError::Network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<SttErrorResponse>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => format!("HTTP {status}: {body}"),
            };
            return Err(if status.as_u16() == 401 {
                SttError::AuthenticationFailed(message)
            } else {
                SttError::Transcription(message)
            });
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&body)
            .map_err(|e| SttError::Transcription(format!("failed to parse response: {e}")))?;

        info!(chars = parsed.text.len(), "transcription complete");
        Ok(parsed.text)
    }

    fn provider_info(&self) -> &'static str {
        "Whisper transcription"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SttConfig {
        SttConfig {
            api_key: "test_key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let stt = WhisperStt::new(test_config()).unwrap();
        assert_eq!(stt.provider_info(), "Whisper transcription");
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let result = WhisperStt::new(SttConfig::default());
        match result {
            Err(SttError::AuthenticationFailed(msg)) => assert!(msg.contains("API key")),
            other => panic!("expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = SttConfig {
            endpoint: "not a url".to_string(),
            ..test_config()
        };
        assert!(matches!(
            WhisperStt::new(config),
            Err(SttError::Configuration(_))
        ));
    }
}
