//! Tagged result of a call to an external AI vendor.
//!
//! Vendors report failures in several shapes: `{"error": {"message": ...}}`,
//! a bare `{"message": ...}`, a JSON document encoded as a string, or plain
//! text. [`normalize_error_message`] folds all of them into one message so
//! the presentation layer only ever sees [`ExternalOutcome`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExternalOutcome<T> {
    Ok {
        value: T,
    },
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cause: Option<String>,
    },
}

impl<T> ExternalOutcome<T> {
    /// Convert a fallible call into an outcome, keeping the error's display
    /// form as the user-facing message and its source chain as the cause.
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: std::error::Error,
    {
        match result {
            Ok(value) => Self::Ok { value },
            Err(error) => {
                let cause = error.source().map(ToString::to_string);
                Self::Error {
                    message: error.to_string(),
                    cause,
                }
            }
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok { value } => Some(value),
            Self::Error { .. } => None,
        }
    }
}

/// Extract a human-readable message from a vendor error body.
///
/// Falls back to `fallback` when the body is empty or is JSON with no
/// recognizable message field.
#[must_use]
pub fn normalize_error_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(inner)) => normalize_error_message(&inner, fallback),
        Ok(value) => message_from_value(&value).unwrap_or_else(|| fallback.to_string()),
        Err(_) => trimmed.to_string(),
    }
}

/// Look for `error.message`, then `message`, then a string `error`.
#[must_use]
pub fn message_from_value(value: &Value) -> Option<String> {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    non_empty(value.get("error").and_then(|e| e.get("message")))
        .or_else(|| non_empty(value.get("message")))
        .or_else(|| non_empty(value.get("error")))
}
