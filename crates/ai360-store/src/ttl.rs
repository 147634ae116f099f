//! Time-bounded cache entries over a [`KeyValueStore`].

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Clock, KeyValueStore, StoreError};

/// Predictions are reused for one hour after they were written.
pub const DEFAULT_PREDICTION_TTL: Duration = Duration::from_millis(3_600_000);

/// Stored wrapper: the cached value plus its write time in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: i64,
}

impl<T> CacheEntry<T> {
    /// Valid only while `now - timestamp < ttl`.
    #[must_use]
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now_ms.saturating_sub(self.timestamp) < ttl_ms
    }
}

pub struct TtlCache<S, C> {
    store: S,
    clock: Arc<C>,
    ttl: Duration,
}

impl<S: KeyValueStore, C: Clock> TtlCache<S, C> {
    pub const fn new(store: S, clock: Arc<C>, ttl: Duration) -> Self {
        Self { store, clock, ttl }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value at `key`, or `None` if absent, expired, or unreadable.
    ///
    /// Expired and corrupt entries are left in place; the caller re-fetches
    /// and overwrites them.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(key, %error, "cache read error");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(key, %error, "cache entry is corrupt; treating as miss");
                return None;
            }
        };

        if entry.is_fresh(self.clock.now_ms(), self.ttl) {
            tracing::debug!(key, "cache hit");
            Some(entry.data)
        } else {
            tracing::debug!(key, "cache entry expired");
            None
        }
    }

    /// Write `value` at `key`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value cannot be encoded or persisted.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let entry = CacheEntry {
            data: value,
            timestamp: self.clock.now_ms(),
        };
        let body = serde_json::to_string(&entry)?;
        self.store.set(key, &body)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be persisted.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.store.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, MemoryStore};

    fn cache(clock: &Arc<ManualClock>) -> TtlCache<MemoryStore, ManualClock> {
        TtlCache::new(MemoryStore::new(), Arc::clone(clock), DEFAULT_PREDICTION_TTL)
    }

    #[test]
    fn put_then_get_roundtrips() {
        let clock = Arc::new(ManualClock::at(1_000));
        let cache = cache(&clock);
        cache.put("k", &vec![1, 2, 3]).unwrap();
        assert_eq!(cache.get::<Vec<i32>>("k"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn entry_expires_at_exactly_the_ttl() {
        let clock = Arc::new(ManualClock::at(0));
        let cache = cache(&clock);
        cache.put("k", &"v").unwrap();

        clock.set_ms(3_599_999);
        assert_eq!(cache.get::<String>("k").as_deref(), Some("v"));
        clock.set_ms(3_600_000);
        assert!(cache.get::<String>("k").is_none());
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let clock = Arc::new(ManualClock::at(0));
        let store = MemoryStore::new();
        store.set("k", "{\"data\": ").unwrap();
        let cache = TtlCache::new(store, clock, DEFAULT_PREDICTION_TTL);
        assert!(cache.get::<String>("k").is_none());
    }

    #[test]
    fn wrong_shape_is_a_miss() {
        let clock = Arc::new(ManualClock::at(0));
        let store = MemoryStore::new();
        store.set("k", r#"{"value": 1}"#).unwrap();
        let cache = TtlCache::new(store, clock, DEFAULT_PREDICTION_TTL);
        assert!(cache.get::<i32>("k").is_none());
    }

    #[test]
    fn overwrite_refreshes_the_timestamp() {
        let clock = Arc::new(ManualClock::at(0));
        let cache = cache(&clock);
        cache.put("k", &1).unwrap();
        clock.advance_ms(3_000_000);
        cache.put("k", &2).unwrap();
        clock.advance_ms(3_000_000);
        assert_eq!(cache.get::<i32>("k"), Some(2));
    }
}
