//! ElevenLabs TTS provider implementation.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.elevenlabs.io/v1/text-to-speech/{voice_id}`
//! - Auth: `xi-api-key` header
//! - Output: encoded audio bytes (MP3 by default)

use reqwest::Client;
use tracing::{debug, info};

use super::super::base::{SynthesizedAudio, TextToSpeech, TtsConfig, TtsError, TtsResult};
use super::messages::{SynthesisRequest, TtsErrorResponse, VoiceSettings};
use crate::core::context::SessionContext;

/// ElevenLabs synthesis client.
#[derive(Debug)]
pub struct ElevenLabsTts {
    config: TtsConfig,
    /// HTTP client, reused across requests for connection pooling.
    http_client: Client,
}

impl ElevenLabsTts {
    /// Create a new provider from configuration.
    pub fn new(config: TtsConfig) -> TtsResult<Self> {
        if config.api_key.is_empty() {
            return Err(TtsError::AuthenticationFailed(
                "API key is required for ElevenLabs TTS".to_string(),
            ));
        }
        config.validate().map_err(TtsError::Configuration)?;

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TtsError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn synthesis_url(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.voice_id
        )
    }
}

#[async_trait::async_trait]
impl TextToSpeech for ElevenLabsTts {
    async fn synthesize(&self, _ctx: &SessionContext, text: &str) -> TtsResult<SynthesizedAudio> {
        let request = SynthesisRequest {
            text: text.to_string(),
            model_id: self.config.model_id.clone(),
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        debug!(chars = text.len(), voice = %self.config.voice_id, "requesting synthesis");

        let response = self
            .http_client
            .post(self.synthesis_url())
            .header("xi-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TtsError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TtsErrorResponse>(&body) {
                Ok(parsed) => parsed.detail.message,
                Err(_) => format!("HTTP {status}: {body}"),
            };
            return Err(if status.as_u16() == 401 {
                TtsError::AuthenticationFailed(message)
            } else {
                TtsError::Synthesis(message)
            });
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| TtsError::Network(format!("failed to read audio body: {e}")))?;

        if data.is_empty() {
            return Err(TtsError::Synthesis(
                "provider returned an empty audio payload".to_string(),
            ));
        }

        info!(bytes = data.len(), %mime_type, "synthesis complete");
        Ok(SynthesizedAudio::new(data, mime_type))
    }

    fn provider_info(&self) -> &'static str {
        "ElevenLabs TTS"
    }
}
