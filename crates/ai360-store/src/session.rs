//! Stored user profile and the app view it implies.

use ai360_core::errors::CoreError;
use ai360_core::profile::{QuizAnswers, UserProfile};
use ai360_core::views::AppView;

use crate::keys::USER_PROFILE;
use crate::{KeyValueStore, StoreError};

pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored profile, if any. A profile that fails to parse is logged and
    /// treated as absent.
    #[must_use]
    pub fn load_profile(&self) -> Option<UserProfile> {
        let raw = match self.store.get(USER_PROFILE) {
            Ok(raw) => raw?,
            Err(error) => {
                tracing::warn!(%error, "failed to read stored profile");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(error) => {
                tracing::warn!(%error, "stored profile is corrupt; ignoring it");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the profile cannot be encoded or persisted.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let body = serde_json::to_string(profile)?;
        self.store.set(USER_PROFILE, &body)
    }

    /// View the app opens on.
    #[must_use]
    pub fn current_view(&self) -> AppView {
        AppView::initial(self.load_profile().is_some())
    }

    /// Walk sign-up and the quiz for a new profile, persist it, and return
    /// the resulting view.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] if the form or quiz answers are invalid,
    /// or another [`StoreError`] if the profile cannot be persisted.
    pub fn complete_onboarding(
        &self,
        name: &str,
        email: &str,
        answers: QuizAnswers,
    ) -> Result<(UserProfile, AppView), StoreError> {
        let view = AppView::Landing.transition(AppView::Signup)?;
        let mut profile = UserProfile::signup(name, email)?;
        let view = view.transition(AppView::Quiz)?;
        profile.apply_quiz(answers)?;
        let view = view.transition(AppView::Dashboard)?;

        self.save_profile(&profile)?;
        tracing::debug!(email = %profile.email, "onboarding complete");
        Ok((profile, view))
    }

    /// Apply further quiz answers to the stored profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] if there is no stored profile or an
    /// answer is invalid.
    pub fn update_profile(&self, answers: QuizAnswers) -> Result<UserProfile, StoreError> {
        let mut profile = self.load_profile().ok_or_else(|| {
            StoreError::Core(CoreError::Validation(
                "no stored profile; run sign-up first".into(),
            ))
        })?;
        profile.apply_quiz(answers)?;
        self.save_profile(&profile)?;
        Ok(profile)
    }

    /// Forget the stored profile. Caches and counters are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be persisted.
    pub fn logout(&self) -> Result<AppView, StoreError> {
        let from = self.current_view();
        self.store.remove(USER_PROFILE)?;
        Ok(match from {
            AppView::Dashboard => from.transition(AppView::Landing)?,
            _ => AppView::Landing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use pretty_assertions::assert_eq;

    fn answers() -> QuizAnswers {
        QuizAnswers {
            age: Some("35".into()),
            gender: Some("Male".into()),
            conditions: None,
            goal: Some("Early diagnosis".into()),
        }
    }

    #[test]
    fn fresh_store_starts_at_landing() {
        let session = SessionStore::new(MemoryStore::new());
        assert_eq!(session.current_view(), AppView::Landing);
        assert!(session.load_profile().is_none());
    }

    #[test]
    fn onboarding_persists_and_resumes_at_dashboard() {
        let session = SessionStore::new(MemoryStore::new());
        let (profile, view) = session
            .complete_onboarding("Sam", "sam@example.com", answers())
            .unwrap();
        assert_eq!(view, AppView::Dashboard);
        assert_eq!(session.load_profile(), Some(profile));
        assert_eq!(session.current_view(), AppView::Dashboard);
    }

    #[test]
    fn invalid_quiz_answer_stores_nothing() {
        let session = SessionStore::new(MemoryStore::new());
        let mut bad = answers();
        bad.goal = Some("Everything".into());
        let err = session
            .complete_onboarding("Sam", "sam@example.com", bad)
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert!(session.load_profile().is_none());
    }

    #[test]
    fn logout_clears_the_profile() {
        let session = SessionStore::new(MemoryStore::new());
        session
            .complete_onboarding("Sam", "sam@example.com", answers())
            .unwrap();
        assert_eq!(session.logout().unwrap(), AppView::Landing);
        assert_eq!(session.current_view(), AppView::Landing);
    }

    #[test]
    fn corrupt_profile_is_ignored() {
        let store = MemoryStore::new();
        store.set(USER_PROFILE, "{\"name\": 3").unwrap();
        let session = SessionStore::new(store);
        assert!(session.load_profile().is_none());
        assert_eq!(session.current_view(), AppView::Landing);
    }

    #[test]
    fn update_requires_a_stored_profile() {
        let session = SessionStore::new(MemoryStore::new());
        assert!(session.update_profile(answers()).is_err());

        session
            .complete_onboarding("Sam", "sam@example.com", QuizAnswers::default())
            .unwrap();
        let updated = session.update_profile(answers()).unwrap();
        assert_eq!(updated.age.as_deref(), Some("35"));
    }
}
