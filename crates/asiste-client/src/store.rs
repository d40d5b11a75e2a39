//! Durable preference store and the session keys layered on top of it.
//!
//! A single JSON file holds a flat string-keyed map, mirroring a mobile
//! preferences store. Writes go through a temp-file-plus-rename so a crash
//! mid-write never leaves readers with a torn file; an unreadable or
//! missing file is treated as an empty store rather than an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use serde_json::Value;

pub const KEY_TOKEN: &str = "auth_token";
pub const KEY_USER_ID: &str = "user_id";
pub const KEY_USER_DNI: &str = "user_dni";
pub const KEY_USER_NAME: &str = "user_name";
const KEY_DEVICE_ID: &str = "device_id";

/// String-keyed durable store. Cheap to clone and share.
#[derive(Clone)]
pub struct PrefStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    map: Mutex<BTreeMap<String, Value>>,
}

impl PrefStore {
    /// Opens the store at `path`, loading whatever is currently persisted.
    /// A missing or corrupt file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let map = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!("preference file at {} is corrupt, starting empty: {}", path.display(), err);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            inner: Arc::new(Inner {
                path,
                map: Mutex::new(map),
            }),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        let map = self.inner.map.lock().unwrap();
        map.get(key).and_then(|v| v.as_str().map(str::to_string))
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        let map = self.inner.map.lock().unwrap();
        map.get(key).and_then(Value::as_i64)
    }

    /// Applies `edit` to the map and persists the result atomically. The
    /// lock is held across the write, so readers observe either the old or
    /// the new state, never a mix.
    pub fn edit(&self, edit: impl FnOnce(&mut BTreeMap<String, Value>)) -> Result<()> {
        let mut map = self.inner.map.lock().unwrap();
        edit(&mut map);
        let json = serde_json::to_string_pretty(&*map).context("Failed to serialize preferences")?;

        if let Some(parent) = self.inner.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("Failed to create preference directory")?;
            }
        }
        let tmp = self.inner.path.with_extension("tmp");
        std::fs::write(&tmp, json).context("Failed to write preference temp file")?;
        std::fs::rename(&tmp, &self.inner.path).context("Failed to replace preference file")?;
        Ok(())
    }

    /// Stable per-installation identifier, generated on first use and
    /// attached to justification submissions.
    pub fn device_id(&self) -> String {
        if let Some(id) = self.get_string(KEY_DEVICE_ID) {
            return id;
        }
        let id = uuid::Uuid::new_v4().to_string();
        if let Err(err) = self.edit(|map| {
            map.insert(KEY_DEVICE_ID.to_string(), Value::String(id.clone()));
        }) {
            tracing::warn!("Failed to persist device id: {:#}", err);
        }
        id
    }
}

/// Session persistence over the preference store. All four fields are
/// written together on login and removed together on logout; no code path
/// may leave them half-set.
#[derive(Clone)]
pub struct SessionStore {
    prefs: PrefStore,
}

impl SessionStore {
    pub fn new(prefs: PrefStore) -> Self {
        Self { prefs }
    }

    pub fn save_session(&self, token: &str, user_id: &str, dni: &str, name: &str) -> Result<()> {
        self.prefs.edit(|map| {
            map.insert(KEY_TOKEN.to_string(), Value::String(token.to_string()));
            map.insert(KEY_USER_ID.to_string(), Value::String(user_id.to_string()));
            map.insert(KEY_USER_DNI.to_string(), Value::String(dni.to_string()));
            map.insert(KEY_USER_NAME.to_string(), Value::String(name.to_string()));
        })
    }

    pub fn token(&self) -> Option<String> {
        self.prefs.get_string(KEY_TOKEN)
    }

    pub fn user_id(&self) -> Option<String> {
        self.prefs.get_string(KEY_USER_ID)
    }

    pub fn user_dni(&self) -> Option<String> {
        self.prefs.get_string(KEY_USER_DNI)
    }

    pub fn user_name(&self) -> Option<String> {
        self.prefs.get_string(KEY_USER_NAME)
    }

    pub fn clear(&self) -> Result<()> {
        self.prefs.edit(|map| {
            map.remove(KEY_TOKEN);
            map.remove(KEY_USER_ID);
            map.remove(KEY_USER_DNI);
            map.remove(KEY_USER_NAME);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, PrefStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("prefs.json"));
        (dir, store)
    }

    #[test]
    fn test_get_missing_key() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get_string("nope"), None);
        assert_eq!(store.get_i64("nope"), None);
    }

    #[test]
    fn test_edit_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = PrefStore::open(&path);
        store
            .edit(|map| {
                map.insert("k".to_string(), Value::String("v".to_string()));
            })
            .unwrap();

        let reopened = PrefStore::open(&path);
        assert_eq!(reopened.get_string("k"), Some("v".to_string()));
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = PrefStore::open(&path);
        assert_eq!(store.get_string("anything"), None);
        // And the store is still writable afterwards
        store
            .edit(|map| {
                map.insert("k".to_string(), Value::String("v".to_string()));
            })
            .unwrap();
        assert_eq!(store.get_string("k"), Some("v".to_string()));
    }

    #[test]
    fn test_device_id_is_stable() {
        let (_dir, store) = temp_store();
        let first = store.device_id();
        let second = store.device_id();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_session_save_and_read() {
        let (_dir, store) = temp_store();
        let session = SessionStore::new(store);
        session
            .save_session("a.b.c", "u1", "12345678", "Ana")
            .unwrap();

        assert_eq!(session.token(), Some("a.b.c".to_string()));
        assert_eq!(session.user_id(), Some("u1".to_string()));
        assert_eq!(session.user_dni(), Some("12345678".to_string()));
        assert_eq!(session.user_name(), Some("Ana".to_string()));
    }

    #[test]
    fn test_session_clear_removes_all_fields() {
        let (_dir, store) = temp_store();
        let session = SessionStore::new(store);
        session
            .save_session("a.b.c", "u1", "12345678", "Ana")
            .unwrap();
        session.clear().unwrap();

        assert_eq!(session.token(), None);
        assert_eq!(session.user_id(), None);
        assert_eq!(session.user_dni(), None);
        assert_eq!(session.user_name(), None);
    }

    #[test]
    fn test_session_clear_keeps_unrelated_keys() {
        let (_dir, store) = temp_store();
        let device = store.device_id();
        let session = SessionStore::new(store.clone());
        session
            .save_session("a.b.c", "u1", "12345678", "Ana")
            .unwrap();
        session.clear().unwrap();

        assert_eq!(store.device_id(), device);
    }
}
