//! Persisting generated event series.
//!
//! A series is written one record per store call with no cross-record
//! transaction. Writes that fail are collected and reported; writes that
//! landed stay in the store. Callers wanting atomicity need a batch
//! primitive from their backend; this module only guarantees that a
//! partial series is never reported as success.

use crate::error::{TroopDirError, TroopDirResult};
use crate::event::GeneratedEvent;
use crate::store::{Store, put_record};

/// Store key for a calendar event record.
pub fn event_key(event_id: &str) -> String {
    format!("calendar/events/{event_id}")
}

/// Write every event of a generated series to the store.
///
/// Returns the number of records written. If some writes fail the rest
/// are still attempted, and the outcome is a
/// [`TroopDirError::PartialPersistence`] naming each failed date and the
/// reason.
pub fn persist_series(store: &dyn Store, events: &[GeneratedEvent]) -> TroopDirResult<usize> {
    let mut failed = Vec::new();

    for event in events {
        if let Err(e) = put_record(store, &event_key(&event.id), event) {
            failed.push((event.date, e.to_string()));
        }
    }

    if failed.is_empty() {
        Ok(events.len())
    } else {
        Err(TroopDirError::PartialPersistence {
            requested: events.len(),
            written: events.len() - failed.len(),
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventTemplate, EventType};
    use crate::recurrence::{RecurrenceRule, Schedule, expand};
    use crate::store::MemoryStore;
    use serde_json::Value;

    /// Store that rejects writes for keys containing a marker substring.
    struct FlakyStore {
        inner: MemoryStore,
        reject: Vec<String>,
    }

    impl Store for FlakyStore {
        fn put(&self, key: &str, value: &Value) -> TroopDirResult<()> {
            if self.reject.iter().any(|r| key.contains(r.as_str())) {
                return Err(TroopDirError::Serialization("write refused".to_string()));
            }
            self.inner.put(key, value)
        }

        fn get(&self, key: &str) -> TroopDirResult<Option<Value>> {
            self.inner.get(key)
        }

        fn delete(&self, key: &str) -> TroopDirResult<()> {
            self.inner.delete(key)
        }

        fn list(&self, prefix: &str) -> TroopDirResult<Vec<(String, Value)>> {
            self.inner.list(prefix)
        }
    }

    fn make_series() -> Vec<GeneratedEvent> {
        let template = EventTemplate::new("Troop Meeting", EventType::Meeting);
        let rule =
            RecurrenceRule::from_form("2025-01-07", "2025-01-28", "weekly", 2, &[]).unwrap();
        expand(&template, &Schedule::Recurring(rule))
    }

    #[test]
    fn test_full_series_persisted() {
        let store = MemoryStore::new();
        let events = make_series();

        let written = persist_series(&store, &events).unwrap();
        assert_eq!(written, 4);
        assert_eq!(store.list("calendar/events").unwrap().len(), 4);
    }

    #[test]
    fn test_partial_failure_is_reported_not_silent() {
        let events = make_series();
        let store = FlakyStore {
            inner: MemoryStore::new(),
            reject: vec![events[1].id.clone(), events[3].id.clone()],
        };

        let err = persist_series(&store, &events).unwrap_err();
        match err {
            TroopDirError::PartialPersistence {
                requested,
                written,
                failed,
            } => {
                assert_eq!(requested, 4);
                assert_eq!(written, 2);
                let failed_dates: Vec<_> =
                    failed.iter().map(|(d, _)| d.to_string()).collect();
                assert_eq!(failed_dates, vec!["2025-01-14", "2025-01-28"]);
            }
            other => panic!("expected PartialPersistence, got {other:?}"),
        }

        // Successful writes stay in the store; there is no rollback.
        assert_eq!(store.inner.list("calendar/events").unwrap().len(), 2);
    }

    #[test]
    fn test_empty_series_is_success() {
        let store = MemoryStore::new();
        assert_eq!(persist_series(&store, &[]).unwrap(), 0);
    }
}
