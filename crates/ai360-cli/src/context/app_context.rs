use std::sync::Arc;

use ai360_client::{ElevenLabsClient, GeminiClient};
use ai360_config::Ai360Config;
use ai360_core::profile::UserProfile;
use ai360_store::{
    ChatCache, FileStore, PredictionCache, SessionStore, StoreError, SystemClock, UsageStore,
};
use anyhow::Context;

type Store = Arc<FileStore>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: Ai360Config,
    pub store: Store,
    pub clock: Arc<SystemClock>,
}

impl AppContext {
    /// Open the local store under the configured data directory.
    pub fn init(config: Ai360Config) -> anyhow::Result<Self> {
        let dir = config
            .general
            .resolved_data_dir()
            .ok_or(StoreError::NoDataDir)?;
        let store = FileStore::open_in(&dir)
            .with_context(|| format!("failed to open local store in {}", dir.display()))?;
        tracing::debug!(path = %store.path().display(), "opened local store");

        Ok(Self {
            config,
            store: Arc::new(store),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn session(&self) -> SessionStore<Store> {
        SessionStore::new(Arc::clone(&self.store))
    }

    pub fn usage(&self) -> UsageStore<Store, SystemClock> {
        UsageStore::new(Arc::clone(&self.store), Arc::clone(&self.clock))
    }

    pub fn chat_cache(&self) -> ChatCache<Store> {
        ChatCache::new(Arc::clone(&self.store), self.config.cache.chat_capacity)
    }

    pub fn prediction_cache(&self) -> PredictionCache<Store, SystemClock> {
        PredictionCache::new(
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            self.config.cache.prediction_ttl(),
        )
    }

    /// The stored profile, or an error pointing at `ai360 profile set`.
    pub fn require_profile(&self) -> anyhow::Result<UserProfile> {
        self.session().load_profile().context(
            "no profile found. Run 'ai360 profile set --name <NAME> --email <EMAIL>' or 'ai360 profile set --guest' first",
        )
    }

    pub fn gemini(&self) -> anyhow::Result<GeminiClient> {
        let config = self.config.require_gemini()?;
        GeminiClient::new(config, self.config.general.request_timeout())
            .context("failed to build Gemini client")
    }

    pub fn speech(&self) -> anyhow::Result<ElevenLabsClient> {
        ElevenLabsClient::new(&self.config.elevenlabs, self.config.general.request_timeout())
            .context("failed to build ElevenLabs client")
    }
}

#[cfg(test)]
impl AppContext {
    /// Context over a fresh store in `dir`.
    pub fn for_dir(dir: &std::path::Path) -> Self {
        let mut config = Ai360Config::default();
        config.general.data_dir = dir.display().to_string();
        Self::init(config).expect("store should open")
    }
}

#[cfg(test)]
mod tests {
    use ai360_core::profile::QuizAnswers;
    use ai360_core::views::AppView;

    use super::*;

    #[test]
    fn resources_share_one_store() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::for_dir(dir.path());

        assert!(ctx.require_profile().is_err());
        ctx.session()
            .complete_onboarding("Ada", "ada@example.com", QuizAnswers::default())
            .unwrap();
        ctx.usage().record_scan().unwrap();
        ctx.chat_cache().put("hello", "hi").unwrap();

        let reopened = AppContext::for_dir(dir.path());
        assert_eq!(reopened.require_profile().unwrap().name, "Ada");
        assert_eq!(reopened.session().current_view(), AppView::Dashboard);
        assert_eq!(reopened.usage().stats().scans, 1);
        assert_eq!(reopened.chat_cache().len(), 1);
    }

    #[test]
    fn gemini_requires_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::for_dir(dir.path());
        let err = ctx.gemini().err().unwrap();
        assert!(err.to_string().contains("AI360_GEMINI__API_KEY"));
    }
}
