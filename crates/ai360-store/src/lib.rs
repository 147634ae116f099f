//! # ai360-store
//!
//! Everything ai360 keeps between runs, behind one injected
//! [`KeyValueStore`] so tests can swap in [`MemoryStore`].
//!
//! - [`FileStore`]: durable string map in a single JSON file
//! - [`TtlCache`] / [`PredictionCache`]: time-bounded memo of predictions
//! - [`ChatCache`]: size-bounded memo of chat answers, oldest-inserted evicted
//! - [`SessionStore`]: stored profile and the app view it implies
//! - [`UsageStore`]: scan and report counters for the overview
//!
//! Cached data that fails to parse is logged and treated as a miss.

pub mod chat_cache;
pub mod clock;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod prediction_cache;
pub mod session;
pub mod ttl;
pub mod usage;

pub use chat_cache::{ChatCache, DEFAULT_CHAT_CAPACITY, normalize_query};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use prediction_cache::{PredictionCache, prediction_key};
pub use session::SessionStore;
pub use ttl::{CacheEntry, DEFAULT_PREDICTION_TTL, TtlCache};
pub use usage::{UsageStats, UsageStore};

/// String-keyed, string-valued durable storage.
///
/// Implementations guard their map with a lock so [`update`](Self::update)
/// runs as one read-modify-write step.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be read.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Replace the value at `key` with `f(current)` atomically. Returning
    /// `None` removes the key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the result cannot be persisted.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Option<String>,
    ) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Option<String>,
    ) -> Result<(), StoreError> {
        (**self).update(key, f)
    }
}
