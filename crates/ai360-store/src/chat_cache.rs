//! Size-bounded memo of chat answers.
//!
//! Stored as one JSON object under [`CHAT_CACHE`](crate::keys::CHAT_CACHE),
//! `{normalized query: answer}`, in insertion order. Past capacity the
//! oldest-inserted entries go first; reads never reorder anything. Entries
//! do not expire by time.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::keys::CHAT_CACHE;
use crate::{KeyValueStore, StoreError};

pub const DEFAULT_CHAT_CAPACITY: usize = 50;

/// Cache key for a chat query: trimmed and lowercased.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Query/answer pairs in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Entries(Vec<(String, String)>);

impl Entries {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Existing keys keep their position; new keys go to the end.
    fn insert(&mut self, key: String, value: String) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    fn retain_newest(&mut self, capacity: usize) {
        let excess = self.0.len().saturating_sub(capacity);
        if excess > 0 {
            self.0.drain(..excess);
        }
    }
}

impl Serialize for Entries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of query → answer strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Entries, A::Error> {
                let mut entries = Entries::default();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    entries.insert(k, v);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

pub struct ChatCache<S> {
    store: S,
    capacity: usize,
}

fn decode(raw: Option<&str>) -> Entries {
    raw.map_or_else(Entries::default, |raw| {
        serde_json::from_str(raw).unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to parse chatbot cache; starting empty");
            Entries::default()
        })
    })
}

impl<S: KeyValueStore> ChatCache<S> {
    pub const fn new(store: S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    fn load(&self) -> Entries {
        match self.store.get(CHAT_CACHE) {
            Ok(raw) => decode(raw.as_deref()),
            Err(error) => {
                tracing::warn!(%error, "chatbot cache read error");
                Entries::default()
            }
        }
    }

    /// Cached answer for `query`, if any.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<String> {
        let key = normalize_query(query);
        if key.is_empty() {
            return None;
        }
        self.load().get(&key).map(str::to_string)
    }

    /// Store `answer` for `query`, evicting the oldest-inserted entries past
    /// capacity. Blank queries are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the cache cannot be encoded or persisted.
    pub fn put(&self, query: &str, answer: &str) -> Result<(), StoreError> {
        let key = normalize_query(query);
        if key.is_empty() {
            return Ok(());
        }

        let mut encode_error = None;
        self.store.update(CHAT_CACHE, &mut |current| {
            let mut entries = decode(current.as_deref());
            entries.insert(key.clone(), answer.to_string());
            entries.retain_newest(self.capacity);
            match serde_json::to_string(&entries) {
                Ok(body) => Some(body),
                Err(error) => {
                    encode_error = Some(error);
                    current
                }
            }
        })?;
        encode_error.map_or(Ok(()), |e| Err(StoreError::Encode(e)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.load().0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queries in insertion order, oldest first.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.load().0.into_iter().map(|(k, _)| k).collect()
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the removal cannot be persisted.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(CHAT_CACHE)
    }
}
