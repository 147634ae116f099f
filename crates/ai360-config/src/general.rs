//! General application configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Upper bound for a single external request, in seconds.
const fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Where the local store lives. Empty means the platform data directory.
    #[serde(default)]
    pub data_dir: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GeneralConfig {
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured data directory, falling back to `<data_dir>/ai360`.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        let configured = self.data_dir.trim();
        if configured.is_empty() {
            dirs::data_dir().map(|d| d.join("ai360"))
        } else {
            Some(PathBuf::from(configured))
        }
    }
}
