//! # ai360-client
//!
//! HTTP clients for the external AI services ai360 relies on:
//! - Gemini for image diagnosis, lab report analysis, health forecasts,
//!   and the streaming chat assistant
//! - ElevenLabs for optional speech synthesis
//!
//! The traits below are the seams the CLI flows are written against, so the
//! flows can be exercised without the network.

pub mod elevenlabs;
pub mod gemini;
pub mod media;
pub mod prompts;
pub mod sse;

mod error;
mod http;

pub use elevenlabs::ElevenLabsClient;
pub use error::ClientError;
pub use gemini::{ChatSession, GeminiClient};
pub use media::ImageInput;

use std::future::Future;
use std::pin::Pin;

use ai360_core::analysis::DiagnosisResult;
use ai360_core::prediction::HealthPrediction;
use ai360_core::profile::UserProfile;
use futures_util::Stream;

/// Text fragments of a streamed reply, in arrival order.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>;

/// Forecasting service: profile plus optional recent diagnosis in, risk
/// assessment out.
pub trait HealthPredictor: Send + Sync {
    fn predict(
        &self,
        profile: &UserProfile,
        diagnosis: Option<&DiagnosisResult>,
    ) -> impl Future<Output = Result<HealthPrediction, ClientError>> + Send;
}

/// A conversational session with the assistant.
pub trait AssistantChat: Send + Sync {
    /// Send `text` and stream the reply. History is not updated.
    fn send_message_stream(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<FragmentStream, ClientError>> + Send;

    /// Record a completed exchange so later messages see it.
    fn commit_turn(&mut self, user: &str, reply: &str);
}

/// Text to audio. Failures are reported as `None`.
pub trait SpeechSynthesizer: Send + Sync {
    fn synthesize(&self, text: &str) -> impl Future<Output = Option<Vec<u8>>> + Send;
}
