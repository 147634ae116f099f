//! # ai360-config
//!
//! Layered configuration loading for ai360 using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AI360_*` prefix, `__` as separator)
//! 2. Project-level `.ai360/config.toml`
//! 3. User-level `~/.config/ai360/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `AI360_GEMINI__API_KEY` -> `gemini.api_key`,
//! `AI360_CACHE__CHAT_CAPACITY` -> `cache.chat_capacity`, etc.
//!
//! ```no_run
//! use ai360_config::Ai360Config;
//!
//! let config = Ai360Config::load_with_dotenv().expect("config");
//! if config.gemini.is_configured() {
//!     println!("chat model: {}", config.gemini.chat_model);
//! }
//! ```

mod cache;
mod elevenlabs;
mod error;
mod gemini;
mod general;

pub use cache::CacheConfig;
pub use elevenlabs::ElevenLabsConfig;
pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "AI360_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Ai360Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Ai360Config {
    /// Load configuration from TOML files and environment variables, then
    /// validate it.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is out
    /// of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory (if any), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or merge extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".ai360/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ai360").join("config.toml"))
    }

    /// Reject values no component can work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| {
            Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: reason.to_string(),
            })
        };

        if self.cache.chat_capacity == 0 {
            return invalid("cache.chat_capacity", "must be at least 1");
        }
        if self.cache.prediction_ttl_secs == 0 {
            return invalid("cache.prediction_ttl_secs", "must be at least 1");
        }
        if self.general.request_timeout_secs == 0 {
            return invalid("general.request_timeout_secs", "must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.elevenlabs.stability) {
            return invalid("elevenlabs.stability", "must be between 0 and 1");
        }
        if !(0.0..=1.0).contains(&self.elevenlabs.similarity_boost) {
            return invalid("elevenlabs.similarity_boost", "must be between 0 and 1");
        }
        for (field, url) in [
            ("gemini.base_url", &self.gemini.base_url),
            ("elevenlabs.base_url", &self.elevenlabs.base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return invalid(field, "must be an http(s) URL");
            }
        }
        Ok(())
    }

    /// Gemini settings, or an error telling the user which variable to set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when no API key is present.
    pub fn require_gemini(&self) -> Result<&GeminiConfig, ConfigError> {
        if self.gemini.is_configured() {
            Ok(&self.gemini)
        } else {
            Err(ConfigError::NotConfigured {
                section: "gemini".into(),
                hint: format!("{ENV_PREFIX}GEMINI__API_KEY"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Ai360Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.gemini.is_configured());
        assert!(!config.elevenlabs.is_configured());
        assert_eq!(config.cache.chat_capacity, 50);
        assert_eq!(config.cache.prediction_ttl_secs, 3600);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut config = Ai360Config::default();
        config.cache.chat_capacity = 0;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { field, .. } if field == "cache.chat_capacity")
        );
    }

    #[test]
    fn stability_out_of_range_is_rejected() {
        let mut config = Ai360Config::default();
        config.elevenlabs.stability = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_gemini_key_names_the_variable() {
        let err = Ai360Config::default().require_gemini().unwrap_err();
        assert!(err.to_string().contains("AI360_GEMINI__API_KEY"));
    }
}
