//! Local directory store: one JSON file per record.
//!
//! Key segments become subdirectories, so `calendar/events/<id>` lives
//! at `<root>/calendar/events/<id>.json`. Listing walks the prefix
//! directory and returns records sorted by key.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{Store, validate_key};
use crate::error::{TroopDirError, TroopDirResult};

pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> TroopDirResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl Store for DirStore {
    fn put(&self, key: &str, value: &Value) -> TroopDirResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(value)
            .map_err(|e| TroopDirError::Serialization(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn get(&self, key: &str) -> TroopDirResult<Option<Value>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let value = serde_json::from_str(&content)
            .map_err(|e| TroopDirError::Serialization(format!("{}: {e}", path.display())))?;
        Ok(Some(value))
    }

    fn delete(&self, key: &str) -> TroopDirResult<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn list(&self, prefix: &str) -> TroopDirResult<Vec<(String, Value)>> {
        validate_key(prefix)?;

        let mut records = Vec::new();
        let dir = self.root.join(prefix);
        if dir.is_dir() {
            collect_records(&self.root, &dir, &mut records)?;
        } else if let Some(value) = self.get(prefix)? {
            // The prefix itself may name a single record.
            records.push((prefix.to_string(), value));
        }

        records.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(records)
    }
}

fn collect_records(
    root: &Path,
    dir: &Path,
    out: &mut Vec<(String, Value)>,
) -> TroopDirResult<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_records(root, &path, out)?;
        } else if path.extension().is_some_and(|e| e == "json") {
            let Some(key) = key_for_path(root, &path) else {
                continue;
            };

            let content = std::fs::read_to_string(&path)?;
            let value = serde_json::from_str(&content)
                .map_err(|e| TroopDirError::Serialization(format!("{}: {e}", path.display())))?;
            out.push((key, value));
        }
    }
    Ok(())
}

/// Reconstruct the store key from a record file path.
fn key_for_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.with_extension("").strip_prefix(root).ok()?.to_owned();
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_store() -> (tempfile::TempDir, DirStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_put_creates_nested_file() {
        let (dir, store) = make_store();
        store
            .put("calendar/events/event-1", &json!({"title": "Camp"}))
            .unwrap();

        assert!(dir.path().join("calendar/events/event-1.json").exists());
        assert_eq!(
            store.get("calendar/events/event-1").unwrap().unwrap()["title"],
            "Camp"
        );
    }

    #[test]
    fn test_get_missing_is_none() {
        let (_dir, store) = make_store();
        assert!(store.get("calendar/events/nope").unwrap().is_none());
    }

    #[test]
    fn test_list_walks_subdirectories_in_key_order() {
        let (_dir, store) = make_store();
        store.put("attendance/cubs/2025_01_14/s1", &json!(1)).unwrap();
        store.put("attendance/cubs/2025_01_07/s2", &json!(2)).unwrap();
        store.put("attendance/cubs/2025_01_07/s1", &json!(3)).unwrap();
        store.put("attendance/rovers/2025_01_07/s9", &json!(4)).unwrap();

        let listed = store.list("attendance/cubs").unwrap();
        let keys: Vec<_> = listed.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "attendance/cubs/2025_01_07/s1",
                "attendance/cubs/2025_01_07/s2",
                "attendance/cubs/2025_01_14/s1",
            ]
        );
    }

    #[test]
    fn test_list_missing_prefix_is_empty() {
        let (_dir, store) = make_store();
        assert!(store.list("gallery/images").unwrap().is_empty());
    }

    #[test]
    fn test_delete_then_overwrite() {
        let (_dir, store) = make_store();
        store.put("scouts/a", &json!({"grade": 4})).unwrap();
        store.put("scouts/a", &json!({"grade": 5})).unwrap();
        assert_eq!(store.get("scouts/a").unwrap().unwrap()["grade"], 5);

        store.delete("scouts/a").unwrap();
        assert!(store.get("scouts/a").unwrap().is_none());
    }

    #[test]
    fn test_traversal_key_rejected() {
        let (_dir, store) = make_store();
        assert!(store.put("../escape", &json!(1)).is_err());
    }
}
