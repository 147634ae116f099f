//! Gemini `generateContent` client.
//!
//! Image diagnosis, report analysis, and forecasts are single JSON-mode
//! calls with a response schema. Chat goes through [`ChatSession`], which
//! streams over SSE.

use std::sync::Arc;
use std::time::Duration;

use ai360_config::GeminiConfig;
use ai360_core::analysis::{BloodReportAnalysis, DiagnosisResult};
use ai360_core::outcome::message_from_value;
use ai360_core::prediction::HealthPrediction;
use ai360_core::profile::UserProfile;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::check_response;
use crate::media::ImageInput;
use crate::sse::fragment_stream;
use crate::{AssistantChat, FragmentStream, HealthPredictor, prompts};

const API_VERSION: &str = "v1beta";

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn image(image: &ImageInput) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
        }
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".into()),
            parts,
        }
    }

    fn model(text: &str) -> Self {
        Self {
            role: Some("model".into()),
            parts: vec![Part::text(text)],
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// A full response, or one streamed chunk of it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    /// Present when a stream fails part-way.
    #[serde(default)]
    error: Option<Value>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub(crate) fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default()
    }

    /// Surface in-band errors and blocked prompts.
    pub(crate) fn check(&self) -> Result<(), ClientError> {
        if let Some(error) = &self.error {
            let status = error
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(500);
            let message = message_from_value(&serde_json::json!({ "error": error }))
                .unwrap_or_else(|| "the service reported an error".to_string());
            return Err(ClientError::Api { status, message });
        }
        if self.candidates.is_empty()
            && let Some(reason) = self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
        {
            return Err(ClientError::Blocked(reason));
        }
        Ok(())
    }
}

/// Parse the JSON document a schema-constrained call returned. An empty
/// answer is read as `{}` so lenient result types fall back to defaults.
fn parse_json_answer<T: DeserializeOwned>(text: &str) -> Result<T, ClientError> {
    let text = text.trim();
    let text = if text.is_empty() { "{}" } else { text };
    serde_json::from_str(text).map_err(|e| ClientError::Parse(e.to_string()))
}

// ── Client ─────────────────────────────────────────────────────────

struct Inner {
    http: reqwest::Client,
    config: GeminiConfig,
    request_timeout: Duration,
}

/// HTTP client for the Gemini API. Cheap to clone.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<Inner>,
}

impl GeminiClient {
    /// Build a client from configuration. `request_timeout` bounds each
    /// non-streaming call; streams are bounded by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingApiKey`] if no API key is configured,
    /// or [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig, request_timeout: Duration) -> Result<Self, ClientError> {
        if !config.is_configured() {
            return Err(ClientError::MissingApiKey { service: "Gemini" });
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("ai360/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config: config.clone(),
                request_timeout,
            }),
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/{API_VERSION}/models/{}:{method}",
            self.inner.config.base_url.trim_end_matches('/'),
            urlencoding::encode(model)
        )
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        model: &str,
        parts: Vec<Part>,
        system: &str,
        schema: Value,
    ) -> Result<T, ClientError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            system_instruction: Some(Content::system(system)),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        tracing::debug!(model, "gemini generateContent");
        let resp = self
            .inner
            .http
            .post(self.endpoint(model, "generateContent"))
            .header("x-goog-api-key", &self.inner.config.api_key)
            .timeout(self.inner.request_timeout)
            .json(&request)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let body: GenerateContentResponse = resp.json().await?;
        body.check()?;
        parse_json_answer(&body.text())
    }

    /// Identify a likely condition in a medical image.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the answer is not JSON.
    pub async fn diagnose_image(&self, image: &ImageInput) -> Result<DiagnosisResult, ClientError> {
        self.generate_json(
            &self.inner.config.vision_model,
            vec![Part::image(image), Part::text(prompts::DIAGNOSIS_PROMPT)],
            prompts::DIAGNOSIS_INSTRUCTION,
            prompts::diagnosis_schema(),
        )
        .await
    }

    /// OCR a blood report image and interpret its markers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the answer is not JSON.
    pub async fn analyze_report(
        &self,
        image: &ImageInput,
    ) -> Result<BloodReportAnalysis, ClientError> {
        self.generate_json(
            &self.inner.config.vision_model,
            vec![Part::image(image), Part::text(prompts::REPORT_PROMPT)],
            prompts::REPORT_INSTRUCTION,
            prompts::report_schema(),
        )
        .await
    }

    /// Start a chat with the given system instruction and no history.
    #[must_use]
    pub fn start_chat(&self, system_instruction: impl Into<String>) -> ChatSession {
        ChatSession {
            client: self.clone(),
            system_instruction: system_instruction.into(),
            history: Vec::new(),
        }
    }
}

impl HealthPredictor for GeminiClient {
    async fn predict(
        &self,
        profile: &UserProfile,
        diagnosis: Option<&DiagnosisResult>,
    ) -> Result<HealthPrediction, ClientError> {
        self.generate_json(
            &self.inner.config.prediction_model,
            vec![Part::text(prompts::prediction_prompt(profile, diagnosis))],
            prompts::PREDICTION_INSTRUCTION,
            prompts::prediction_schema(),
        )
        .await
    }
}

// ── Chat ───────────────────────────────────────────────────────────

/// A conversation with a fixed system instruction. History grows only when
/// a turn is committed, so a failed reply leaves no trace.
pub struct ChatSession {
    client: GeminiClient,
    system_instruction: String,
    history: Vec<Content>,
}

impl ChatSession {
    #[must_use]
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    fn request_for(&self, text: &str) -> GenerateContentRequest {
        let mut contents = self.history.clone();
        contents.push(Content::user(vec![Part::text(text)]));
        GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system(&self.system_instruction)),
            generation_config: None,
        }
    }
}

impl AssistantChat for ChatSession {
    async fn send_message_stream(&self, text: &str) -> Result<FragmentStream, ClientError> {
        let inner = &self.client.inner;
        let model = &inner.config.chat_model;
        let url = format!(
            "{}?alt=sse",
            self.client.endpoint(model, "streamGenerateContent")
        );

        tracing::debug!(model = %model, turns = self.history.len(), "gemini streamGenerateContent");
        let resp = inner
            .http
            .post(url)
            .header("x-goog-api-key", &inner.config.api_key)
            .json(&self.request_for(text))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(fragment_stream(resp.bytes_stream()))
    }

    fn commit_turn(&mut self, user: &str, reply: &str) {
        self.history.push(Content::user(vec![Part::text(user)]));
        self.history.push(Content::model(reply));
    }
}
