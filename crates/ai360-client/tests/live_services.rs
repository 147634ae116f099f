//! Live calls against the real services.
//!
//! Ignored by default. Run with `--ignored` after exporting
//! `AI360_GEMINI__API_KEY` (and optionally `AI360_ELEVENLABS__API_KEY`).

use std::time::Duration;

use ai360_client::{AssistantChat, ElevenLabsClient, GeminiClient, HealthPredictor, SpeechSynthesizer};
use ai360_config::Ai360Config;
use ai360_core::profile::UserProfile;
use futures_util::TryStreamExt;

fn config() -> Option<Ai360Config> {
    let config = Ai360Config::load_with_dotenv().ok()?;
    if config.gemini.is_configured() {
        Some(config)
    } else {
        eprintln!("SKIP: Gemini not configured");
        None
    }
}

fn profile() -> UserProfile {
    UserProfile {
        name: "Test".into(),
        email: "test@example.com".into(),
        age: Some("45".into()),
        gender: Some("Female".into()),
        conditions: Some("mild hypertension".into()),
        goal: Some("Preventive care".into()),
    }
}

#[tokio::test]
#[ignore = "requires network and a Gemini API key"]
async fn prediction_round_trip() {
    let Some(config) = config() else { return };
    let client = GeminiClient::new(&config.gemini, Duration::from_secs(60)).unwrap();
    let prediction = client.predict(&profile(), None).await.unwrap();
    assert!(!prediction.summary.is_empty());
}

#[tokio::test]
#[ignore = "requires network and a Gemini API key"]
async fn chat_streams_fragments() {
    let Some(config) = config() else { return };
    let client = GeminiClient::new(&config.gemini, Duration::from_secs(60)).unwrap();
    let chat = client.start_chat("Answer in one short sentence.");
    let fragments: Vec<String> = chat
        .send_message_stream("What is a normal resting heart rate?")
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert!(!fragments.concat().trim().is_empty());
}

#[tokio::test]
#[ignore = "requires network and an ElevenLabs API key"]
async fn speech_returns_audio() {
    let Ok(config) = Ai360Config::load_with_dotenv() else { return };
    if !config.elevenlabs.is_configured() {
        eprintln!("SKIP: ElevenLabs not configured");
        return;
    }
    let client = ElevenLabsClient::new(&config.elevenlabs, Duration::from_secs(60)).unwrap();
    let audio = client.synthesize("Hello there.").await;
    assert!(audio.is_some_and(|a| !a.is_empty()));
}
