//! In-memory store, for tests and embedding.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde_json::Value;

use super::{Store, validate_key};
use crate::error::TroopDirResult;

/// A `BTreeMap`-backed store. Keys iterate in order, so `list` ordering
/// matches [`super::DirStore`] for free.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl Store for MemoryStore {
    fn put(&self, key: &str, value: &Value) -> TroopDirResult<()> {
        validate_key(key)?;
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> TroopDirResult<Option<Value>> {
        validate_key(key)?;
        Ok(self.records.borrow().get(key).cloned())
    }

    fn delete(&self, key: &str) -> TroopDirResult<()> {
        validate_key(key)?;
        self.records.borrow_mut().remove(key);
        Ok(())
    }

    fn list(&self, prefix: &str) -> TroopDirResult<Vec<(String, Value)>> {
        validate_key(prefix)?;
        let prefix_path = format!("{prefix}/");

        Ok(self
            .records
            .borrow()
            .iter()
            .filter(|(key, _)| *key == prefix || key.starts_with(&prefix_path))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_get_delete() {
        let store = MemoryStore::new();
        store.put("scouts/a", &json!({"firstName": "Ada"})).unwrap();

        assert_eq!(
            store.get("scouts/a").unwrap().unwrap()["firstName"],
            "Ada"
        );

        store.delete("scouts/a").unwrap();
        assert!(store.get("scouts/a").unwrap().is_none());

        // Deleting again is a no-op
        store.delete("scouts/a").unwrap();
    }

    #[test]
    fn test_list_is_prefix_scoped_and_ordered() {
        let store = MemoryStore::new();
        store.put("calendar/events/b", &json!(2)).unwrap();
        store.put("calendar/events/a", &json!(1)).unwrap();
        store.put("calendar/rsvps/x", &json!(3)).unwrap();

        let listed = store.list("calendar/events").unwrap();
        let keys: Vec<_> = listed.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["calendar/events/a", "calendar/events/b"]);
    }

    #[test]
    fn test_list_prefix_does_not_match_partial_segment() {
        let store = MemoryStore::new();
        store.put("scouts/a", &json!(1)).unwrap();
        store.put("scouts-archive/b", &json!(2)).unwrap();

        assert_eq!(store.list("scouts").unwrap().len(), 1);
    }
}
