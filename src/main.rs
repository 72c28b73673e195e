use std::io::Write;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use tracing::debug;

use medguard_companion::config::CompanionConfig;
use medguard_companion::core::audio::{
    AudioError, AudioResult, CaptureDevice, CapturedAudio, PlaybackDevice,
};
use medguard_companion::core::tts::{ElevenLabsTts, SynthesizedAudio};
use medguard_companion::core::{
    ChatOrchestrator, OpenRouterChat, OrchestratorError, SessionContext, Transcript, VoicePipeline,
    WhisperStt,
};

/// MedGuard Companion - terminal chat with the patient assistant
#[derive(Parser, Debug)]
#[command(name = "medguard-companion")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Capture device placeholder for the terminal binary.
///
/// The terminal has no microphone access; voice input is only available to
/// embedding applications that supply platform devices. Starting a
/// recording here reports a permission failure, which exercises the same
/// path a denied browser microphone would.
struct NoMicrophone;

#[async_trait::async_trait]
impl CaptureDevice for NoMicrophone {
    async fn start(&mut self) -> AudioResult<()> {
        Err(AudioError::PermissionDenied(
            "no capture device available in the terminal".to_string(),
        ))
    }

    async fn stop(&mut self) -> AudioResult<CapturedAudio> {
        Err(AudioError::PermissionDenied(
            "no capture device available in the terminal".to_string(),
        ))
    }
}

/// Playback placeholder matching [`NoMicrophone`].
struct NoSpeaker;

#[async_trait::async_trait]
impl PlaybackDevice for NoSpeaker {
    async fn play(&mut self, _audio: &SynthesizedAudio) -> AudioResult<()> {
        Err(AudioError::Playback(
            "no playback device available in the terminal".to_string(),
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from file or environment
    let config = if let Some(config_path) = cli.config {
        println!("Loading configuration from {}", config_path.display());
        CompanionConfig::from_file(&config_path)?
    } else {
        CompanionConfig::from_env()?
    };
    debug!(model = %config.chat_model, "configuration loaded");

    let chat = OpenRouterChat::new(config.chat_config()).map_err(|e| anyhow!(e.to_string()))?;

    // The speech services are wired when their keys are present so the
    // orchestrator is fully assembled, but this binary drives text only.
    let stt = WhisperStt::new(config.stt_config())
        .map(|s| Box::new(s) as Box<dyn medguard_companion::core::SpeechToText>);
    let tts = ElevenLabsTts::new(config.tts_config())
        .map(|t| Box::new(t) as Box<dyn medguard_companion::core::TextToSpeech>);
    let voice = match (stt, tts) {
        (Ok(stt), Ok(tts)) => {
            VoicePipeline::new(Box::new(NoMicrophone), stt, tts, Box::new(NoSpeaker))
        }
        _ => {
            debug!("speech provider keys missing, voice pipeline runs with stub providers");
            stub_voice_pipeline()
        }
    };

    let mut orchestrator = ChatOrchestrator::with_transcript(
        Box::new(chat),
        voice,
        SessionContext::anonymous(),
        Transcript::with_greeting(&config.greeting),
    );

    // Print the greeting the conversation opens with.
    if let Some(greeting) = orchestrator.transcript().last() {
        println!("assistant: {}\n", greeting.text());
    }

    let stdin = std::io::stdin();
    loop {
        print!("you: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        match orchestrator.submit_text(line).await {
            Ok(()) => {
                if let Some(reply) = orchestrator.transcript().last() {
                    println!("assistant: {}\n", reply.text());
                }
            }
            Err(OrchestratorError::EmptyInput) => continue,
            Err(e) => eprintln!("error: {e}"),
        }
    }

    Ok(())
}

/// Voice pipeline wired with providers that fail on use, for deployments
/// without speech credentials.
fn stub_voice_pipeline() -> VoicePipeline {
    use medguard_companion::core::stt::{SpeechToText, SttError, SttResult};
    use medguard_companion::core::tts::{TextToSpeech, TtsError, TtsResult};

    struct UnconfiguredStt;

    #[async_trait::async_trait]
    impl SpeechToText for UnconfiguredStt {
        async fn transcribe(
            &self,
            _ctx: &SessionContext,
            _audio: &CapturedAudio,
        ) -> SttResult<String> {
            Err(SttError::Configuration(
                "no transcription provider configured".to_string(),
            ))
        }
        fn provider_info(&self) -> &'static str {
            "unconfigured stt"
        }
    }

    struct UnconfiguredTts;

    #[async_trait::async_trait]
    impl TextToSpeech for UnconfiguredTts {
        async fn synthesize(
            &self,
            _ctx: &SessionContext,
            _text: &str,
        ) -> TtsResult<SynthesizedAudio> {
            Err(TtsError::Configuration(
                "no synthesis provider configured".to_string(),
            ))
        }
        fn provider_info(&self) -> &'static str {
            "unconfigured tts"
        }
    }

    VoicePipeline::new(
        Box::new(NoMicrophone),
        Box::new(UnconfiguredStt),
        Box::new(UnconfiguredTts),
        Box::new(NoSpeaker),
    )
}
