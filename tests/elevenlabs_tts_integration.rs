//! Integration tests for the ElevenLabs synthesis provider against a mock
//! endpoint.

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medguard_companion::core::SessionContext;
use medguard_companion::core::tts::{ElevenLabsTts, TextToSpeech, TtsConfig, TtsError};

fn provider_for(server: &MockServer) -> ElevenLabsTts {
    ElevenLabsTts::new(TtsConfig {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        voice_id: "voice-1".to_string(),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_synthesis_roundtrip() {
    let server = MockServer::start().await;
    let audio = vec![0x49u8, 0x44, 0x33, 0x04]; // ID3 header bytes

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/voice-1"))
        .and(header("xi-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "model_id": "eleven_turbo_v2",
            "voice_settings": {"stability": 0.7, "similarity_boost": 0.9}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(audio.clone(), "audio/mpeg"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tts = provider_for(&server);
    let synthesized = tts
        .synthesize(&SessionContext::anonymous(), "Take one tablet daily.")
        .await
        .unwrap();

    assert_eq!(synthesized.data.as_ref(), audio.as_slice());
    assert_eq!(synthesized.mime_type, "audio/mpeg");
}

#[tokio::test]
async fn test_provider_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_raw(
            r#"{"detail":{"status":"invalid_voice","message":"voice not found"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let tts = provider_for(&server);
    let result = tts.synthesize(&SessionContext::anonymous(), "hello").await;

    match result {
        Err(TtsError::Synthesis(msg)) => assert!(msg.contains("voice not found")),
        other => panic!("expected synthesis error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_an_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"detail":{"status":"invalid_api_key","message":"bad key"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let tts = provider_for(&server);
    let result = tts.synthesize(&SessionContext::anonymous(), "hello").await;

    assert!(matches!(result, Err(TtsError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_empty_audio_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(Vec::<u8>::new(), "audio/mpeg"))
        .mount(&server)
        .await;

    let tts = provider_for(&server);
    let result = tts.synthesize(&SessionContext::anonymous(), "hello").await;

    assert!(matches!(result, Err(TtsError::Synthesis(_))));
}
