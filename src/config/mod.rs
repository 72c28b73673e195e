//! Configuration for the companion core.
//!
//! Configuration comes from three places, merged in priority order:
//! YAML file > environment variables > `.env` values > built-in defaults.
//! (`.env` files are loaded into the environment by the binary before any
//! of this runs.)
//!
//! # Example
//! ```rust,no_run
//! use medguard_companion::config::CompanionConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = CompanionConfig::from_env()?;
//!
//! // Load from a YAML file with environment variable fallback
//! let config = CompanionConfig::from_file(&PathBuf::from("config.yaml"))?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

mod env;
mod yaml;

use env::EnvConfig;
use yaml::YamlConfig;

use crate::core::chat::{ChatConfig, DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL, DEFAULT_SYSTEM_PROMPT};
use crate::core::orchestrator::DEFAULT_GREETING;
use crate::core::stt::{SttConfig, WHISPER_STT_URL};
use crate::core::tts::TtsConfig;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Companion core configuration.
///
/// Carries everything needed to construct the chat client, the speech
/// providers, and a fresh conversation.
#[derive(Debug, Clone)]
pub struct CompanionConfig {
    // Chat completion endpoint
    pub chat_endpoint: String,
    pub chat_model: String,
    pub system_prompt: String,

    // Provider API keys
    pub openrouter_api_key: Option<String>,
    /// OpenAI API key for Whisper transcription.
    pub openai_api_key: Option<String>,
    /// ElevenLabs API key for speech synthesis.
    pub elevenlabs_api_key: Option<String>,
    /// ElevenLabs voice to synthesize with.
    pub elevenlabs_voice_id: Option<String>,

    // Voice pipeline settings
    pub stt_endpoint: String,
    pub stt_model: String,
    pub language: String,
    pub tts_model_id: String,
    pub tts_stability: f32,
    pub tts_similarity_boost: f32,

    // Conversation seed
    pub greeting: String,

    // Network bounds
    pub request_timeout: Duration,
    pub stream_idle_timeout: Duration,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            chat_endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            openrouter_api_key: None,
            openai_api_key: None,
            elevenlabs_api_key: None,
            elevenlabs_voice_id: None,
            stt_endpoint: WHISPER_STT_URL.to_string(),
            stt_model: "whisper-1".to_string(),
            language: "en".to_string(),
            tts_model_id: "eleven_turbo_v2".to_string(),
            tts_stability: 0.7,
            tts_similarity_boost: 0.9,
            greeting: DEFAULT_GREETING.to_string(),
            request_timeout: Duration::from_secs(30),
            stream_idle_timeout: Duration::from_secs(120),
        }
    }
}

impl CompanionConfig {
    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().merged_with_env(EnvConfig::load());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, with environment variables
    /// filling anything the file leaves out.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let yaml: YamlConfig = serde_yaml::from_str(&contents)?;

        let config = Self::default()
            .merged_with_env(EnvConfig::load())
            .merged_with_yaml(yaml);
        config.validate()?;
        Ok(config)
    }

    fn merged_with_env(mut self, env: EnvConfig) -> Self {
        if let Some(v) = env.chat_endpoint {
            self.chat_endpoint = v;
        }
        if let Some(v) = env.chat_model {
            self.chat_model = v;
        }
        if let Some(v) = env.system_prompt {
            self.system_prompt = v;
        }
        if env.openrouter_api_key.is_some() {
            self.openrouter_api_key = env.openrouter_api_key;
        }
        if env.openai_api_key.is_some() {
            self.openai_api_key = env.openai_api_key;
        }
        if env.elevenlabs_api_key.is_some() {
            self.elevenlabs_api_key = env.elevenlabs_api_key;
        }
        if env.elevenlabs_voice_id.is_some() {
            self.elevenlabs_voice_id = env.elevenlabs_voice_id;
        }
        if let Some(v) = env.stt_endpoint {
            self.stt_endpoint = v;
        }
        if let Some(v) = env.stt_model {
            self.stt_model = v;
        }
        if let Some(v) = env.language {
            self.language = v;
        }
        if let Some(v) = env.tts_model_id {
            self.tts_model_id = v;
        }
        if let Some(v) = env.tts_stability {
            self.tts_stability = v;
        }
        if let Some(v) = env.tts_similarity_boost {
            self.tts_similarity_boost = v;
        }
        if let Some(v) = env.greeting {
            self.greeting = v;
        }
        if let Some(v) = env.request_timeout_seconds {
            self.request_timeout = Duration::from_secs(v);
        }
        if let Some(v) = env.stream_idle_timeout_seconds {
            self.stream_idle_timeout = Duration::from_secs(v);
        }
        self
    }

    fn merged_with_yaml(mut self, yaml: YamlConfig) -> Self {
        if let Some(chat) = yaml.chat {
            if let Some(v) = chat.endpoint {
                self.chat_endpoint = v;
            }
            if let Some(v) = chat.model {
                self.chat_model = v;
            }
            if let Some(v) = chat.system_prompt {
                self.system_prompt = v;
            }
        }
        if let Some(providers) = yaml.providers {
            if providers.openrouter_api_key.is_some() {
                self.openrouter_api_key = providers.openrouter_api_key;
            }
            if providers.openai_api_key.is_some() {
                self.openai_api_key = providers.openai_api_key;
            }
            if providers.elevenlabs_api_key.is_some() {
                self.elevenlabs_api_key = providers.elevenlabs_api_key;
            }
            if providers.elevenlabs_voice_id.is_some() {
                self.elevenlabs_voice_id = providers.elevenlabs_voice_id;
            }
        }
        if let Some(voice) = yaml.voice {
            if let Some(v) = voice.stt_endpoint {
                self.stt_endpoint = v;
            }
            if let Some(v) = voice.stt_model {
                self.stt_model = v;
            }
            if let Some(v) = voice.language {
                self.language = v;
            }
            if let Some(v) = voice.tts_model_id {
                self.tts_model_id = v;
            }
            if let Some(v) = voice.stability {
                self.tts_stability = v;
            }
            if let Some(v) = voice.similarity_boost {
                self.tts_similarity_boost = v;
            }
        }
        if let Some(conversation) = yaml.conversation {
            if let Some(v) = conversation.greeting {
                self.greeting = v;
            }
        }
        if let Some(timeouts) = yaml.timeouts {
            if let Some(v) = timeouts.request_seconds {
                self.request_timeout = Duration::from_secs(v);
            }
            if let Some(v) = timeouts.stream_idle_seconds {
                self.stream_idle_timeout = Duration::from_secs(v);
            }
        }
        self
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chat_config().validate().map_err(ConfigError::Invalid)?;
        crate::utils::validate_endpoint(&self.stt_endpoint).map_err(ConfigError::Invalid)?;
        if !(0.0..=1.0).contains(&self.tts_stability) {
            return Err(ConfigError::Invalid(format!(
                "tts stability {} out of range 0.0..=1.0",
                self.tts_stability
            )));
        }
        if !(0.0..=1.0).contains(&self.tts_similarity_boost) {
            return Err(ConfigError::Invalid(format!(
                "tts similarity boost {} out of range 0.0..=1.0",
                self.tts_similarity_boost
            )));
        }
        if self.request_timeout.is_zero() || self.stream_idle_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Chat client configuration derived from this config.
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            endpoint: self.chat_endpoint.clone(),
            api_key: self.openrouter_api_key.clone().unwrap_or_default(),
            model: self.chat_model.clone(),
            system_prompt: self.system_prompt.clone(),
            connect_timeout: self.request_timeout,
            idle_timeout: self.stream_idle_timeout,
        }
    }

    /// Transcription client configuration derived from this config.
    pub fn stt_config(&self) -> SttConfig {
        SttConfig {
            endpoint: self.stt_endpoint.clone(),
            api_key: self.openai_api_key.clone().unwrap_or_default(),
            model: self.stt_model.clone(),
            language: self.language.clone(),
            request_timeout: Duration::from_secs(120).max(self.request_timeout),
        }
    }

    /// Synthesis provider configuration derived from this config.
    pub fn tts_config(&self) -> TtsConfig {
        TtsConfig {
            api_key: self.elevenlabs_api_key.clone().unwrap_or_default(),
            voice_id: self.elevenlabs_voice_id.clone().unwrap_or_default(),
            model_id: self.tts_model_id.clone(),
            stability: self.tts_stability,
            similarity_boost: self.tts_similarity_boost,
            request_timeout: self.request_timeout,
            ..Default::default()
        }
    }
}
