//! Path-addressed record storage.
//!
//! Records are plain serde structs keyed by `/`-separated paths
//! (`calendar/events/<id>`, `attendance/<team>/<date>/<scout>`). One
//! canonical interface; backends are thin adapters behind the [`Store`]
//! trait.

mod dir;
mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{TroopDirError, TroopDirResult};

/// A key-value record store addressed by `/`-separated path keys.
pub trait Store {
    fn put(&self, key: &str, value: &Value) -> TroopDirResult<()>;

    fn get(&self, key: &str) -> TroopDirResult<Option<Value>>;

    /// Deleting a missing key is a no-op.
    fn delete(&self, key: &str) -> TroopDirResult<()>;

    /// All records whose key starts with `prefix`, ordered by key.
    fn list(&self, prefix: &str) -> TroopDirResult<Vec<(String, Value)>>;
}

/// Serialize `record` and store it under `key`.
pub fn put_record<T: Serialize>(store: &dyn Store, key: &str, record: &T) -> TroopDirResult<()> {
    let value =
        serde_json::to_value(record).map_err(|e| TroopDirError::Serialization(e.to_string()))?;
    store.put(key, &value)
}

/// Fetch and deserialize the record under `key`, if any.
pub fn get_record<T: DeserializeOwned>(store: &dyn Store, key: &str) -> TroopDirResult<Option<T>> {
    match store.get(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| TroopDirError::Serialization(e.to_string())),
        None => Ok(None),
    }
}

/// All records under `prefix`, deserialized, ordered by key.
pub fn list_records<T: DeserializeOwned>(
    store: &dyn Store,
    prefix: &str,
) -> TroopDirResult<Vec<(String, T)>> {
    store
        .list(prefix)?
        .into_iter()
        .map(|(key, value)| {
            serde_json::from_value(value)
                .map(|record| (key, record))
                .map_err(|e| TroopDirError::Serialization(e.to_string()))
        })
        .collect()
}

/// Validate a store key: non-empty `/`-separated segments of filename-safe
/// characters. Rejects traversal segments before they reach a backend.
pub(crate) fn validate_key(key: &str) -> TroopDirResult<()> {
    let valid = !key.is_empty()
        && key.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
        });

    if valid {
        Ok(())
    } else {
        Err(TroopDirError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        for key in [
            "calendar/events/event-1730000000000-abc123def",
            "attendance/cubs/2025_01_07/scout-1",
            "subscribers/parent@example.com",
        ] {
            assert!(validate_key(key).is_ok(), "{key}");
        }
    }

    #[test]
    fn test_invalid_keys() {
        for key in ["", "a//b", "../etc/passwd", "a/./b", "spaces in key", "/lead"] {
            assert!(validate_key(key).is_err(), "{key:?}");
        }
    }
}
