//! Request and error wire types for the ElevenLabs synthesis API.

use serde::{Deserialize, Serialize};

/// `POST /v1/text-to-speech/{voice_id}` request body.
#[derive(Debug, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
}

/// Voice tuning parameters.
#[derive(Debug, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

/// Error body shape used by the provider.
#[derive(Debug, Deserialize)]
pub struct TtsErrorResponse {
    pub detail: TtsErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct TtsErrorDetail {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_expected_shape() {
        let request = SynthesisRequest {
            text: "Take one tablet daily.".to_string(),
            model_id: "eleven_turbo_v2".to_string(),
            voice_settings: VoiceSettings {
                stability: 0.7,
                similarity_boost: 0.9,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model_id"], serde_json::json!("eleven_turbo_v2"));
        assert_eq!(value["voice_settings"]["stability"], serde_json::json!(0.7));
        assert_eq!(
            value["voice_settings"]["similarity_boost"],
            serde_json::json!(0.9)
        );
    }

    #[test]
    fn test_error_body_parses() {
        let body = r#"{"detail":{"status":"invalid_api_key","message":"Invalid API key"}}"#;
        let parsed: TtsErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.detail.message, "Invalid API key");
        assert_eq!(parsed.detail.status.as_deref(), Some("invalid_api_key"));
    }
}
