//! YAML configuration file structures.

use serde::Deserialize;

/// Complete YAML configuration structure.
///
/// All fields are optional to allow partial configuration; environment
/// variables fill anything a file leaves out, and file values win where
/// both are set.
///
/// # Example YAML structure
/// ```yaml
/// chat:
///   endpoint: "https://openrouter.ai/api/v1/chat/completions"
///   model: "meta-llama/llama-4-scout:free"
///
/// providers:
///   openrouter_api_key: "your-openrouter-key"
///   openai_api_key: "your-openai-key"
///   elevenlabs_api_key: "your-elevenlabs-key"
///   elevenlabs_voice_id: "your-voice-id"
///
/// voice:
///   stt_model: "whisper-1"
///   language: "en"
///   tts_model_id: "eleven_turbo_v2"
///   stability: 0.7
///   similarity_boost: 0.9
///
/// conversation:
///   greeting: "Hello! How can I help you today?"
///
/// timeouts:
///   request_seconds: 30
///   stream_idle_seconds: 120
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub chat: Option<ChatYaml>,
    pub providers: Option<ProvidersYaml>,
    pub voice: Option<VoiceYaml>,
    pub conversation: Option<ConversationYaml>,
    pub timeouts: Option<TimeoutsYaml>,
}

/// Chat endpoint configuration from YAML.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ChatYaml {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
}

/// Provider credentials from YAML.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    pub openrouter_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: Option<String>,
}

/// Voice pipeline configuration from YAML.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct VoiceYaml {
    pub stt_endpoint: Option<String>,
    pub stt_model: Option<String>,
    pub language: Option<String>,
    pub tts_model_id: Option<String>,
    pub stability: Option<f32>,
    pub similarity_boost: Option<f32>,
}

/// Conversation seed configuration from YAML.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ConversationYaml {
    pub greeting: Option<String>,
}

/// Network timeout configuration from YAML.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TimeoutsYaml {
    pub request_seconds: Option<u64>,
    pub stream_idle_seconds: Option<u64>,
}
