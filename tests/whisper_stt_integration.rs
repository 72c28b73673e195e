//! Integration tests for the Whisper transcription client against a mock
//! endpoint.

use bytes::Bytes;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medguard_companion::core::audio::CapturedAudio;
use medguard_companion::core::stt::{SpeechToText, SttConfig, SttError, WhisperStt};
use medguard_companion::core::SessionContext;

fn captured(seconds: f32) -> CapturedAudio {
    let bytes = (16_000.0 * 2.0 * seconds) as usize;
    CapturedAudio::new(Bytes::from(vec![0u8; bytes]), 16_000, 1)
}

fn client_for(server: &MockServer) -> WhisperStt {
    WhisperStt::new(SttConfig {
        endpoint: format!("{}/v1/audio/transcriptions", server.uri()),
        api_key: "test-key".to_string(),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_transcription_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"text":"I have a headache"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let stt = client_for(&server);
    let text = stt
        .transcribe(&SessionContext::anonymous(), &captured(0.5))
        .await
        .unwrap();

    assert_eq!(text, "I have a headache");
}

#[tokio::test]
async fn test_provider_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            r#"{"error":{"message":"audio too short","type":"invalid_request_error"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let stt = client_for(&server);
    let result = stt
        .transcribe(&SessionContext::anonymous(), &captured(0.01))
        .await;

    match result {
        Err(SttError::Transcription(msg)) => assert!(msg.contains("audio too short")),
        other => panic!("expected transcription error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_an_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"error":{"message":"bad key","type":"auth"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let stt = client_for(&server);
    let result = stt
        .transcribe(&SessionContext::anonymous(), &captured(0.5))
        .await;

    assert!(matches!(result, Err(SttError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_unparseable_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
        .mount(&server)
        .await;

    let stt = client_for(&server);
    let result = stt
        .transcribe(&SessionContext::anonymous(), &captured(0.5))
        .await;

    assert!(matches!(result, Err(SttError::Transcription(_))));
}
