//! Response cache limits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_prediction_ttl_secs() -> u64 {
    3600
}

const fn default_chat_capacity() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// How long a stored prediction is reused, in seconds.
    #[serde(default = "default_prediction_ttl_secs")]
    pub prediction_ttl_secs: u64,

    /// Chat answers kept before the oldest is evicted.
    #[serde(default = "default_chat_capacity")]
    pub chat_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prediction_ttl_secs: default_prediction_ttl_secs(),
            chat_capacity: default_chat_capacity(),
        }
    }
}

impl CacheConfig {
    pub const fn prediction_ttl(&self) -> Duration {
        Duration::from_secs(self.prediction_ttl_secs)
    }
}
