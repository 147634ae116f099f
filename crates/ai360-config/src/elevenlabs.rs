//! ElevenLabs text-to-speech configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

const fn default_stability() -> f64 {
    0.6
}

const fn default_similarity_boost() -> f64 {
    0.8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElevenLabsConfig {
    /// Sent as the `xi-api-key` header. Speech is skipped when empty.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Voice stability in `[0, 1]`.
    #[serde(default = "default_stability")]
    pub stability: f64,

    /// Similarity boost in `[0, 1]`.
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f64,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            voice_id: default_voice_id(),
            model_id: default_model_id(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
        }
    }
}

impl ElevenLabsConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
