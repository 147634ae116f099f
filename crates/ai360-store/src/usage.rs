//! Scan and report counters shown on the overview.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::keys::{LAST_ACTIVITY, REPORTS_COUNT, SCANS_COUNT};
use crate::{Clock, KeyValueStore, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageStats {
    pub scans: u64,
    pub reports: u64,
    pub last_activity: Option<DateTime<Utc>>,
}

pub struct UsageStore<S, C> {
    store: S,
    clock: Arc<C>,
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

impl<S: KeyValueStore, C: Clock> UsageStore<S, C> {
    pub const fn new(store: S, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    fn bump(&self, key: &str) -> Result<u64, StoreError> {
        let mut next = 0;
        self.store.update(key, &mut |current| {
            next = parse_count(current.as_deref()).saturating_add(1);
            Some(next.to_string())
        })?;
        self.store
            .set(LAST_ACTIVITY, &self.clock.now().to_rfc3339())?;
        Ok(next)
    }

    /// Count one diagnosis scan and stamp the activity time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the counter cannot be persisted.
    pub fn record_scan(&self) -> Result<u64, StoreError> {
        self.bump(SCANS_COUNT)
    }

    /// Count one report analysis and stamp the activity time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the counter cannot be persisted.
    pub fn record_report(&self) -> Result<u64, StoreError> {
        self.bump(REPORTS_COUNT)
    }

    /// Current counters. Unreadable values count as zero.
    #[must_use]
    pub fn stats(&self) -> UsageStats {
        let read = |key: &str| match self.store.get(key) {
            Ok(v) => v,
            Err(error) => {
                tracing::warn!(key, %error, "usage counter read error");
                None
            }
        };
        UsageStats {
            scans: parse_count(read(SCANS_COUNT).as_deref()),
            reports: parse_count(read(REPORTS_COUNT).as_deref()),
            last_activity: read(LAST_ACTIVITY)
                .and_then(|v| DateTime::parse_from_rfc3339(v.trim()).ok())
                .map(|t| t.with_timezone(&Utc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, MemoryStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn counters_start_at_zero() {
        let usage = UsageStore::new(MemoryStore::new(), Arc::new(ManualClock::at(0)));
        assert_eq!(usage.stats(), UsageStats::default());
    }

    #[test]
    fn recording_increments_and_stamps_activity() {
        let clock = Arc::new(ManualClock::at(1_700_000_000_000));
        let usage = UsageStore::new(MemoryStore::new(), Arc::clone(&clock));

        assert_eq!(usage.record_scan().unwrap(), 1);
        assert_eq!(usage.record_scan().unwrap(), 2);
        clock.advance_ms(60_000);
        assert_eq!(usage.record_report().unwrap(), 1);

        let stats = usage.stats();
        assert_eq!(stats.scans, 2);
        assert_eq!(stats.reports, 1);
        assert_eq!(
            stats.last_activity.map(|t| t.timestamp_millis()),
            Some(1_700_000_060_000)
        );
    }

    #[test]
    fn garbage_counter_restarts_from_zero() {
        let store = MemoryStore::new();
        store.set(SCANS_COUNT, "many").unwrap();
        store.set(LAST_ACTIVITY, "yesterday").unwrap();
        let usage = UsageStore::new(store, Arc::new(ManualClock::at(0)));

        let stats = usage.stats();
        assert_eq!(stats.scans, 0);
        assert!(stats.last_activity.is_none());
        assert_eq!(usage.record_scan().unwrap(), 1);
    }
}
