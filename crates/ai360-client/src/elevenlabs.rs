//! ElevenLabs text-to-speech.
//!
//! Speech is an optional extra: a missing key or a failed call is logged
//! and yields `None` instead of an error.

use std::time::Duration;

use ai360_config::ElevenLabsConfig;
use ai360_core::text::speech_text;
use serde::Serialize;

use crate::SpeechSynthesizer;
use crate::error::ClientError;
use crate::http::check_response;

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f64,
    similarity_boost: f64,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

pub struct ElevenLabsClient {
    http: reqwest::Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ElevenLabsConfig, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ai360/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.config.voice_id)
        )
    }

    fn request<'a>(&'a self, text: &'a str) -> SpeechRequest<'a> {
        SpeechRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        }
    }

    /// Audio bytes (MPEG) for `text`, or an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingApiKey`] without a key, otherwise any
    /// transport or API error.
    pub async fn try_synthesize(&self, text: &str) -> Result<Vec<u8>, ClientError> {
        if !self.config.is_configured() {
            return Err(ClientError::MissingApiKey {
                service: "ElevenLabs",
            });
        }
        let resp = self
            .http
            .post(self.endpoint())
            .header("xi-api-key", &self.config.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&self.request(text))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}

impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        let text = speech_text(text);
        if text.trim().is_empty() {
            return None;
        }
        match self.try_synthesize(&text).await {
            Ok(audio) => Some(audio),
            Err(ClientError::MissingApiKey { .. }) => {
                tracing::warn!(
                    "ElevenLabs API key missing; set AI360_ELEVENLABS__API_KEY to enable speech"
                );
                None
            }
            Err(error) => {
                tracing::error!(%error, "speech synthesis failed");
                None
            }
        }
    }
}
