//! Top-level app views and dashboard sections.
//!
//! ```text
//! landing → signup → quiz → dashboard
//!    ↑        │               │
//!    └────────┘ (back)        │
//!    └────────────────────────┘ (logout)
//! ```
//!
//! Inside the dashboard any section is reachable from any other.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// AppView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppView {
    Landing,
    Signup,
    Quiz,
    Dashboard,
}

impl AppView {
    /// View shown at startup: a stored profile resumes straight at the dashboard.
    #[must_use]
    pub const fn initial(has_stored_profile: bool) -> Self {
        if has_stored_profile {
            Self::Dashboard
        } else {
            Self::Landing
        }
    }

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Landing => &[Self::Signup],
            Self::Signup => &[Self::Landing, Self::Quiz],
            Self::Quiz => &[Self::Dashboard],
            Self::Dashboard => &[Self::Landing],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Move to `next` if the state machine allows it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] for any other target.
    pub fn transition(self, next: Self) -> Result<Self, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landing => "LANDING",
            Self::Signup => "SIGNUP",
            Self::Quiz => "QUIZ",
            Self::Dashboard => "DASHBOARD",
        }
    }
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DashboardSection
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardSection {
    #[default]
    Overview,
    Diagnosis,
    Prediction,
    ReportExplainer,
    Chatbot,
}

impl DashboardSection {
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Diagnosis,
        Self::Prediction,
        Self::ReportExplainer,
        Self::Chatbot,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "OVERVIEW",
            Self::Diagnosis => "DIAGNOSIS",
            Self::Prediction => "PREDICTION",
            Self::ReportExplainer => "REPORT_EXPLAINER",
            Self::Chatbot => "CHATBOT",
        }
    }
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarding_path_is_linear() {
        let view = AppView::Landing
            .transition(AppView::Signup)
            .and_then(|v| v.transition(AppView::Quiz))
            .and_then(|v| v.transition(AppView::Dashboard))
            .unwrap();
        assert_eq!(view, AppView::Dashboard);
    }

    #[test]
    fn logout_returns_to_landing() {
        assert_eq!(
            AppView::Dashboard.transition(AppView::Landing).unwrap(),
            AppView::Landing
        );
    }

    #[test]
    fn skipping_the_quiz_is_rejected() {
        let err = AppView::Signup.transition(AppView::Dashboard).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert!(!AppView::Landing.can_transition_to(AppView::Dashboard));
    }

    #[test]
    fn initial_view_depends_on_stored_profile() {
        assert_eq!(AppView::initial(true), AppView::Dashboard);
        assert_eq!(AppView::initial(false), AppView::Landing);
    }

    #[test]
    fn section_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&DashboardSection::ReportExplainer).unwrap();
        assert_eq!(json, "\"REPORT_EXPLAINER\"");
        assert_eq!(DashboardSection::default(), DashboardSection::Overview);
    }
}
