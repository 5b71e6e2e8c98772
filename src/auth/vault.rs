use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};

use crate::models::User;

pub const KEY_USER: &str = "user";
pub const KEY_AUTH_TOKEN: &str = "authToken";
pub const KEY_REMEMBER_ME: &str = "rememberMe";

/// Minimal local key-value surface the session persists through. The three
/// keys above and the camelCase User JSON under `user` are the compatibility
/// contract for restoring a session on restart.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed store: one JSON object of string entries, written atomically
/// through a sibling tmp file.
#[derive(Clone)]
pub struct JsonFileStore {
    db_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            db_path: base_dir.join("meetspace-session.json"),
        }
    }

    fn read_entries(&self) -> Result<HashMap<String, String>> {
        if !self.db_path.exists() {
            return Ok(HashMap::new());
        }

        let raw = fs::read_to_string(&self.db_path)
            .with_context(|| format!("failed to read {}", self.db_path.display()))?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&raw).with_context(|| {
            format!(
                "failed to deserialize session entries from {}",
                self.db_path.display()
            )
        })
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let tmp_path = self.db_path.with_extension("tmp");
        let serialized = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp_path, serialized)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.db_path).with_context(|| {
            format!(
                "failed to atomically move {} to {}",
                tmp_path.display(),
                self.db_path.display()
            )
        })?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("memory store mutex poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("memory store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("memory store mutex poisoned")
            .remove(key);
        Ok(())
    }
}

/// Typed view over the key-value store holding the persisted session.
#[derive(Clone)]
pub struct SessionVault {
    store: Arc<dyn KeyValueStore>,
}

impl SessionVault {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn file_backed(base_dir: PathBuf) -> Self {
        Self::new(Arc::new(JsonFileStore::new(base_dir)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    pub fn save_session(&self, user: &User, token: &str, remember_me: bool) -> Result<()> {
        let serialized = serde_json::to_string(user).context("failed to serialize user")?;
        self.store.set(KEY_USER, &serialized)?;
        self.store.set(KEY_AUTH_TOKEN, token)?;
        if remember_me {
            self.store.set(KEY_REMEMBER_ME, "true")?;
        }
        Ok(())
    }

    pub fn save_user(&self, user: &User) -> Result<()> {
        let serialized = serde_json::to_string(user).context("failed to serialize user")?;
        self.store.set(KEY_USER, &serialized)
    }

    /// Restores the persisted user. Both the user entry and the auth token
    /// must be present; anything less is treated as no session.
    pub fn load_session(&self) -> Result<Option<User>> {
        let Some(raw_user) = self.store.get(KEY_USER)? else {
            return Ok(None);
        };
        if self.store.get(KEY_AUTH_TOKEN)?.is_none() {
            return Ok(None);
        }

        let user = serde_json::from_str(&raw_user).context("failed to deserialize saved user")?;
        Ok(Some(user))
    }

    pub fn remember_me(&self) -> Result<bool> {
        Ok(self.store.get(KEY_REMEMBER_ME)?.as_deref() == Some("true"))
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(KEY_USER)?;
        self.store.remove(KEY_AUTH_TOKEN)?;
        self.store.remove(KEY_REMEMBER_ME)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn sample_user() -> User {
        User {
            id: "42".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@company.com".to_string(),
            avatar: None,
            is_online: Some(true),
            role: None,
            department: None,
            phone: None,
            timezone: None,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn round_trips_a_session() {
        let vault = SessionVault::in_memory();
        let user = sample_user();

        vault.save_session(&user, "mock-session-token", true).unwrap();

        let restored = vault.load_session().unwrap().expect("session present");
        assert_eq!(restored.id, user.id);
        assert_eq!(restored.email, user.email);
        assert!(vault.remember_me().unwrap());
    }

    #[test]
    fn user_without_token_is_not_a_session() {
        let vault = SessionVault::in_memory();
        vault.save_user(&sample_user()).unwrap();

        assert!(vault.load_session().unwrap().is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let vault = SessionVault::in_memory();
        vault
            .save_session(&sample_user(), "mock-session-token", false)
            .unwrap();

        vault.clear().unwrap();

        assert!(vault.load_session().unwrap().is_none());
        assert!(!vault.remember_me().unwrap());
    }

    #[test]
    fn file_store_round_trips_entries() {
        let base_dir =
            std::env::temp_dir().join(format!("meetspace-vault-{}", uuid::Uuid::new_v4()));
        let store = JsonFileStore::new(base_dir.clone());

        store.set("user", "{}").unwrap();
        store.set("authToken", "mock-session-token").unwrap();
        assert_eq!(store.get("authToken").unwrap().as_deref(), Some("mock-session-token"));

        store.remove("authToken").unwrap();
        assert!(store.get("authToken").unwrap().is_none());

        let _ = fs::remove_dir_all(base_dir);
    }
}
