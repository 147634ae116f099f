//! Names of the entries this crate keeps in a [`KeyValueStore`].
//!
//! Values are stored in this crate's own formats: the profile and chat cache
//! as JSON, counters as decimal strings, and the last activity as an RFC 3339
//! timestamp. Prediction entries are keyed per profile shape by
//! [`prediction_key`], with the email lowercased and absent fields empty.
//!
//! [`KeyValueStore`]: crate::KeyValueStore
//! [`prediction_key`]: crate::prediction_cache::prediction_key

pub const USER_PROFILE: &str = "ai360_user";
pub const CHAT_CACHE: &str = "ai360_chatbot_cache";
pub const SCANS_COUNT: &str = "ai360_scans_count";
pub const REPORTS_COUNT: &str = "ai360_reports_count";
pub const LAST_ACTIVITY: &str = "ai360_last_activity";

/// Prefix of every prediction cache entry.
pub const PREDICTION_PREFIX: &str = "prediction-";
