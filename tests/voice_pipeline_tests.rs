//! End-to-end voice interaction tests: fake audio devices and speech
//! services around the real orchestrator, with the chat stream served by a
//! mock endpoint.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use medguard_companion::core::audio::{
    AudioError, AudioResult, CaptureDevice, CapturedAudio, PlaybackDevice,
};
use medguard_companion::core::chat::{ChatConfig, OpenRouterChat};
use medguard_companion::core::stt::{SpeechToText, SttResult};
use medguard_companion::core::tts::{SynthesizedAudio, TextToSpeech, TtsError, TtsResult};
use medguard_companion::core::{
    ChatOrchestrator, OrchestratorError, Role, SessionContext, VoicePipeline, VoiceState,
};

struct FixedCapture {
    pcm: Bytes,
}

#[async_trait::async_trait]
impl CaptureDevice for FixedCapture {
    async fn start(&mut self) -> AudioResult<()> {
        Ok(())
    }
    async fn stop(&mut self) -> AudioResult<CapturedAudio> {
        Ok(CapturedAudio::new(self.pcm.clone(), 16_000, 1))
    }
}

struct FixedStt {
    text: String,
}

#[async_trait::async_trait]
impl SpeechToText for FixedStt {
    async fn transcribe(
        &self,
        _ctx: &SessionContext,
        _audio: &CapturedAudio,
    ) -> SttResult<String> {
        Ok(self.text.clone())
    }
    fn provider_info(&self) -> &'static str {
        "fixed stt"
    }
}

struct EchoTts;

#[async_trait::async_trait]
impl TextToSpeech for EchoTts {
    async fn synthesize(&self, _ctx: &SessionContext, text: &str) -> TtsResult<SynthesizedAudio> {
        Ok(SynthesizedAudio::new(
            Bytes::from(text.as_bytes().to_vec()),
            "audio/mpeg",
        ))
    }
    fn provider_info(&self) -> &'static str {
        "echo tts"
    }
}

struct FailingTts;

#[async_trait::async_trait]
impl TextToSpeech for FailingTts {
    async fn synthesize(&self, _ctx: &SessionContext, _text: &str) -> TtsResult<SynthesizedAudio> {
        Err(TtsError::Synthesis("voice service down".to_string()))
    }
    fn provider_info(&self) -> &'static str {
        "failing tts"
    }
}

struct RecordingPlayback {
    played: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl PlaybackDevice for RecordingPlayback {
    async fn play(&mut self, audio: &SynthesizedAudio) -> AudioResult<()> {
        assert!(!audio.is_empty());
        self.played.store(true, Ordering::SeqCst);
        Ok(())
    }
}

struct DeniedCapture;

#[async_trait::async_trait]
impl CaptureDevice for DeniedCapture {
    async fn start(&mut self) -> AudioResult<()> {
        Err(AudioError::PermissionDenied("microphone denied".to_string()))
    }
    async fn stop(&mut self) -> AudioResult<CapturedAudio> {
        Err(AudioError::PermissionDenied("microphone denied".to_string()))
    }
}

async fn mock_chat_endpoint(deltas: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    let mut body = String::new();
    for delta in deltas {
        body.push_str(&format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":{}}}}}]}}\n\n",
            serde_json::to_string(delta).unwrap()
        ));
    }
    body.push_str("data: [DONE]\n\n");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;
    server
}

fn chat_client(server: &MockServer) -> Box<OpenRouterChat> {
    Box::new(
        OpenRouterChat::new(ChatConfig {
            endpoint: format!("{}/v1/chat/completions", server.uri()),
            api_key: "test-key".to_string(),
            ..Default::default()
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn test_voice_cycle_speaks_the_streamed_reply() {
    let server = mock_chat_endpoint(&["Drink plenty ", "of fluids."]).await;
    let played = Arc::new(AtomicBool::new(false));

    let voice = VoicePipeline::new(
        Box::new(FixedCapture {
            pcm: Bytes::from(vec![0u8; 6400]),
        }),
        Box::new(FixedStt {
            text: "what helps with a cold".to_string(),
        }),
        Box::new(EchoTts),
        Box::new(RecordingPlayback {
            played: played.clone(),
        }),
    );
    let mut orch =
        ChatOrchestrator::new(chat_client(&server), voice, SessionContext::anonymous());

    assert_eq!(orch.toggle_voice().await.unwrap(), VoiceState::Recording);
    assert!(orch.is_busy());
    assert_eq!(orch.toggle_voice().await.unwrap(), VoiceState::Idle);

    assert!(played.load(Ordering::SeqCst));
    let turns = orch.transcript().turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[1].role, Role::User);
    assert_eq!(turns[1].text(), "what helps with a cold");
    assert_eq!(turns[2].role, Role::Assistant);
    assert_eq!(turns[2].text(), "Drink plenty of fluids.");
    assert!(!orch.is_busy());
}

#[tokio::test]
async fn test_double_toggle_without_audio_stays_quiet() {
    let server = mock_chat_endpoint(&["never requested"]).await;
    let played = Arc::new(AtomicBool::new(false));

    let voice = VoicePipeline::new(
        Box::new(FixedCapture { pcm: Bytes::new() }),
        Box::new(FixedStt {
            text: "unused".to_string(),
        }),
        Box::new(EchoTts),
        Box::new(RecordingPlayback {
            played: played.clone(),
        }),
    );
    let mut orch =
        ChatOrchestrator::new(chat_client(&server), voice, SessionContext::anonymous());
    let before = orch.transcript().len();

    assert_eq!(orch.toggle_voice().await.unwrap(), VoiceState::Recording);
    assert_eq!(orch.toggle_voice().await.unwrap(), VoiceState::Idle);

    assert_eq!(orch.transcript().len(), before);
    assert!(!played.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_denied_microphone_surfaces_permission_error() {
    let server = mock_chat_endpoint(&[]).await;

    let voice = VoicePipeline::new(
        Box::new(DeniedCapture),
        Box::new(FixedStt {
            text: "unused".to_string(),
        }),
        Box::new(EchoTts),
        Box::new(RecordingPlayback {
            played: Arc::new(AtomicBool::new(false)),
        }),
    );
    let mut orch =
        ChatOrchestrator::new(chat_client(&server), voice, SessionContext::anonymous());

    let result = orch.toggle_voice().await;
    assert!(matches!(result, Err(OrchestratorError::Voice(_))));
    assert!(!orch.is_busy());
    assert_eq!(orch.transcript().len(), 1);
}

#[tokio::test]
async fn test_synthesis_failure_keeps_the_conversation() {
    let server = mock_chat_endpoint(&["Rest and hydrate."]).await;

    let voice = VoicePipeline::new(
        Box::new(FixedCapture {
            pcm: Bytes::from(vec![0u8; 6400]),
        }),
        Box::new(FixedStt {
            text: "what helps with a cold".to_string(),
        }),
        Box::new(FailingTts),
        Box::new(RecordingPlayback {
            played: Arc::new(AtomicBool::new(false)),
        }),
    );
    let mut orch =
        ChatOrchestrator::new(chat_client(&server), voice, SessionContext::anonymous());

    orch.toggle_voice().await.unwrap();
    let result = orch.toggle_voice().await;

    // The spoken reply failed, but the conversation itself completed: both
    // turns are committed and final.
    assert!(matches!(result, Err(OrchestratorError::Voice(_))));
    let turns = orch.transcript().turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[2].text(), "Rest and hydrate.");
    assert!(!turns[2].is_streaming());
    assert!(!orch.is_busy());
}
