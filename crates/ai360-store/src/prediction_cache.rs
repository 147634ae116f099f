//! Per-profile memo of health predictions.
//!
//! Entries are keyed by profile shape, not identity: two users with the same
//! email, age, gender and goal share an entry.

use std::sync::Arc;
use std::time::Duration;

use ai360_core::prediction::HealthPrediction;
use ai360_core::profile::UserProfile;

use crate::keys::PREDICTION_PREFIX;
use crate::{Clock, KeyValueStore, StoreError, TtlCache};

/// `prediction-{email}-{age}-{gender}-{goal}` with each field trimmed, the
/// email lowercased, and absent fields left empty.
#[must_use]
pub fn prediction_key(profile: &UserProfile) -> String {
    let field = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().to_string();
    format!(
        "{PREDICTION_PREFIX}{}-{}-{}-{}",
        profile.email.trim().to_lowercase(),
        field(&profile.age),
        field(&profile.gender),
        field(&profile.goal),
    )
}

pub struct PredictionCache<S, C> {
    inner: TtlCache<S, C>,
}

impl<S: KeyValueStore, C: Clock> PredictionCache<S, C> {
    pub const fn new(store: S, clock: Arc<C>, ttl: Duration) -> Self {
        Self {
            inner: TtlCache::new(store, clock, ttl),
        }
    }

    #[must_use]
    pub fn get(&self, profile: &UserProfile) -> Option<HealthPrediction> {
        self.inner.get(&prediction_key(profile))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the prediction cannot be persisted.
    pub fn put(
        &self,
        profile: &UserProfile,
        prediction: &HealthPrediction,
    ) -> Result<(), StoreError> {
        self.inner.put(&prediction_key(profile), prediction)
    }

    /// Drop the entry for `profile` so the next fetch goes to the service.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be persisted.
    pub fn invalidate(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.inner.remove(&prediction_key(profile))
    }
}

/// Remove every prediction entry from `store`, returning how many were removed.
///
/// # Errors
///
/// Returns [`StoreError`] if the store cannot be read or a removal fails.
pub fn clear_predictions<S: KeyValueStore>(store: &S) -> Result<usize, StoreError> {
    let keys: Vec<String> = store
        .keys()?
        .into_iter()
        .filter(|k| k.starts_with(PREDICTION_PREFIX))
        .collect();
    for key in &keys {
        store.remove(key)?;
    }
    Ok(keys.len())
}

/// Count stored prediction entries, fresh or not.
///
/// # Errors
///
/// Returns [`StoreError`] if the store cannot be read.
pub fn count_predictions<S: KeyValueStore>(store: &S) -> Result<usize, StoreError> {
    Ok(store
        .keys()?
        .iter()
        .filter(|k| k.starts_with(PREDICTION_PREFIX))
        .count())
}
