//! Gemini generative language API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Fast multimodal model used for image analysis and chat.
fn default_flash_model() -> String {
    "gemini-3-flash-preview".to_string()
}

/// Reasoning model used for health forecasts.
fn default_prediction_model() -> String {
    "gemini-3-pro-preview".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,

    /// API root, without the `/v1beta` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model for skin-image diagnosis and lab report OCR.
    #[serde(default = "default_flash_model")]
    pub vision_model: String,

    #[serde(default = "default_flash_model")]
    pub chat_model: String,

    #[serde(default = "default_prediction_model")]
    pub prediction_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            vision_model: default_flash_model(),
            chat_model: default_flash_model(),
            prediction_model: default_prediction_model(),
        }
    }
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
