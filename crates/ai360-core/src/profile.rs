//! User profile collected at sign-up and during the onboarding quiz.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Email the landing page uses for guest access.
pub const GUEST_EMAIL: &str = "guest@example.com";

pub const GUEST_NAME: &str = "Guest User";

/// Answers offered by the onboarding quiz for gender.
pub const GENDER_OPTIONS: [&str; 4] = ["Male", "Female", "Other", "Prefer not to say"];

/// Answers offered by the onboarding quiz for the primary goal.
pub const GOAL_OPTIONS: [&str; 3] = ["Early diagnosis", "Understanding reports", "Preventive care"];

const MAX_AGE: u16 = 130;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// Fields the quiz fills in after sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAnswers {
    pub age: Option<String>,
    pub gender: Option<String>,
    pub conditions: Option<String>,
    pub goal: Option<String>,
}

fn present(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|v| !v.is_empty())
}

impl UserProfile {
    /// Build a profile from the sign-up form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name or email is blank or the
    /// email has no `@`.
    pub fn signup(name: &str, email: &str) -> Result<Self, CoreError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("name is required".into()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(CoreError::Validation(format!("invalid email: '{email}'")));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            ..Self::default()
        })
    }

    /// Merge validated quiz answers into the profile.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if an answer is not one of the quiz
    /// options or the age is not a plausible whole number.
    pub fn apply_quiz(&mut self, answers: QuizAnswers) -> Result<(), CoreError> {
        if let Some(age) = present(answers.age.as_deref()) {
            match age.parse::<u16>() {
                Ok(n) if n > 0 && n <= MAX_AGE => {}
                _ => return Err(CoreError::Validation(format!("invalid age: '{age}'"))),
            }
        }
        if let Some(gender) = present(answers.gender.as_deref())
            && !GENDER_OPTIONS.contains(&gender)
        {
            return Err(CoreError::Validation(format!(
                "gender must be one of: {}",
                GENDER_OPTIONS.join(", ")
            )));
        }
        if let Some(goal) = present(answers.goal.as_deref())
            && !GOAL_OPTIONS.contains(&goal)
        {
            return Err(CoreError::Validation(format!(
                "goal must be one of: {}",
                GOAL_OPTIONS.join(", ")
            )));
        }

        let owned = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        self.age = owned(answers.age).or(self.age.take());
        self.gender = owned(answers.gender).or(self.gender.take());
        self.conditions = owned(answers.conditions).or(self.conditions.take());
        self.goal = owned(answers.goal).or(self.goal.take());
        Ok(())
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.email.eq_ignore_ascii_case(GUEST_EMAIL)
    }

    /// A prediction needs an email plus at least one of age or gender.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InsufficientProfile`] otherwise.
    pub fn ensure_prediction_ready(&self) -> Result<(), CoreError> {
        let has_email = !self.email.trim().is_empty();
        let has_demographic =
            present(self.age.as_deref()).is_some() || present(self.gender.as_deref()).is_some();
        if has_email && has_demographic {
            Ok(())
        } else {
            Err(CoreError::InsufficientProfile)
        }
    }
}
