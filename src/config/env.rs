//! Environment variable configuration loading.

/// Raw configuration values read from the process environment.
///
/// `.env` files are loaded by the binary (via `dotenvy`) before this runs,
/// so values from a `.env` file and real environment variables arrive the
/// same way, with real variables winning.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub chat_endpoint: Option<String>,
    pub chat_model: Option<String>,
    pub system_prompt: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: Option<String>,
    pub stt_endpoint: Option<String>,
    pub stt_model: Option<String>,
    pub language: Option<String>,
    pub tts_model_id: Option<String>,
    pub tts_stability: Option<f32>,
    pub tts_similarity_boost: Option<f32>,
    pub greeting: Option<String>,
    pub request_timeout_seconds: Option<u64>,
    pub stream_idle_timeout_seconds: Option<u64>,
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    var(name).and_then(|v| v.parse().ok())
}

impl EnvConfig {
    /// Read configuration from the process environment.
    pub fn load() -> Self {
        Self {
            chat_endpoint: var("CHAT_ENDPOINT"),
            chat_model: var("CHAT_MODEL"),
            system_prompt: var("SYSTEM_PROMPT"),
            openrouter_api_key: var("OPENROUTER_API_KEY"),
            openai_api_key: var("OPENAI_API_KEY"),
            elevenlabs_api_key: var("ELEVENLABS_API_KEY"),
            elevenlabs_voice_id: var("ELEVENLABS_VOICE_ID"),
            stt_endpoint: var("STT_ENDPOINT"),
            stt_model: var("STT_MODEL"),
            language: var("STT_LANGUAGE"),
            tts_model_id: var("TTS_MODEL_ID"),
            tts_stability: parsed_var("TTS_STABILITY"),
            tts_similarity_boost: parsed_var("TTS_SIMILARITY_BOOST"),
            greeting: var("COMPANION_GREETING"),
            request_timeout_seconds: parsed_var("REQUEST_TIMEOUT_SECONDS"),
            stream_idle_timeout_seconds: parsed_var("STREAM_IDLE_TIMEOUT_SECONDS"),
        }
    }
}
