//! # Twostep Auth Memory Adapter
//!
//! In-memory credential and session stores for Twostep Auth, primarily
//! intended for testing and development purposes. Data is lost when the
//! process exits.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use twostep_auth_memory::{MemoryCredentialStore, MemorySession};
//!
//! let store = MemoryCredentialStore::new();
//! store.insert("Users", record).await;
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use twostep_auth_core::error::{AuthError, AuthResult};
use twostep_auth_core::session::SessionStore;
use twostep_auth_core::store::CredentialStore;
use twostep_auth_core::types::UserRecord;

/// A named projection applied to a matched record.
///
/// Returning `None` drops the match, letting a finder also act as a
/// filter (a disabled-accounts finder, for instance).
pub type Finder = Arc<dyn Fn(&UserRecord) -> Option<UserRecord> + Send + Sync>;

/// In-memory credential store.
///
/// Records are grouped per user model; finders are registered by name,
/// with `"all"` (the identity projection) built in. Field names used for
/// lookup and rehash writes are configurable to mirror non-standard
/// schemas.
#[derive(Clone)]
pub struct MemoryCredentialStore {
    models: Arc<RwLock<HashMap<String, Vec<UserRecord>>>>,
    finders: Arc<RwLock<HashMap<String, Finder>>>,
    username_field: String,
    password_field: String,
    id_field: String,
}

impl MemoryCredentialStore {
    /// Creates a new in-memory store with default field names
    /// (`username`, `password`, `id`).
    pub fn new() -> Self {
        let mut finders: HashMap<String, Finder> = HashMap::new();
        finders.insert("all".to_string(), Arc::new(|record| Some(record.clone())));
        Self {
            models: Arc::new(RwLock::new(HashMap::new())),
            finders: Arc::new(RwLock::new(finders)),
            username_field: "username".to_string(),
            password_field: "password".to_string(),
            id_field: "id".to_string(),
        }
    }

    /// Sets the field records are matched on during lookup.
    pub fn with_username_field(mut self, field: impl Into<String>) -> Self {
        self.username_field = field.into();
        self
    }

    /// Sets the field rehash writes replace.
    pub fn with_password_field(mut self, field: impl Into<String>) -> Self {
        self.password_field = field.into();
        self
    }

    /// Sets the field rehash writes are keyed on.
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Inserts a record under a user model.
    pub async fn insert(&self, model: &str, record: UserRecord) {
        let mut models = self.models.write().await;
        models.entry(model.to_string()).or_default().push(record);
    }

    /// Registers a finder under a name, replacing any previous entry.
    pub async fn register_finder<F>(&self, name: &str, finder: F)
    where
        F: Fn(&UserRecord) -> Option<UserRecord> + Send + Sync + 'static,
    {
        let mut finders = self.finders.write().await;
        finders.insert(name.to_string(), Arc::new(finder));
    }

    /// Clears all stored records.
    pub async fn clear(&self) {
        self.models.write().await.clear();
    }

    /// Returns the number of records stored under a model.
    pub async fn record_count(&self, model: &str) -> usize {
        let models = self.models.read().await;
        models.get(model).map_or(0, Vec::len)
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(
        &self,
        model: &str,
        username: &str,
        finder: &str,
    ) -> AuthResult<Option<UserRecord>> {
        let project = {
            let finders = self.finders.read().await;
            finders
                .get(finder)
                .cloned()
                .ok_or_else(|| AuthError::UnknownFinder {
                    name: finder.to_string(),
                })?
        };

        let models = self.models.read().await;
        let Some(records) = models.get(model) else {
            return Ok(None);
        };
        for record in records {
            if record.get_str(&self.username_field) == Some(username) {
                return Ok(project(record));
            }
        }
        Ok(None)
    }

    async fn update_password_hash(
        &self,
        model: &str,
        identifier: &Value,
        new_hash: &str,
    ) -> AuthResult<()> {
        let mut models = self.models.write().await;
        let records = models
            .get_mut(model)
            .ok_or_else(|| AuthError::store(format!("unknown user model: {model}")))?;
        for record in records.iter_mut() {
            if record.get(&self.id_field) == Some(identifier) {
                record.set(&self.password_field, Value::String(new_hash.to_string()));
                return Ok(());
            }
        }
        Err(AuthError::store(format!(
            "no {model} record with {} = {identifier}",
            self.id_field
        )))
    }
}

/// In-memory session backing a request cycle in tests.
#[derive(Debug, Default)]
pub struct MemorySession {
    values: Mutex<HashMap<String, Value>>,
}

impl MemorySession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn read(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .expect("session lock poisoned")
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: Value) {
        self.values
            .lock()
            .expect("session lock poisoned")
            .insert(key.to_string(), value);
    }

    fn delete(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .expect("session lock poisoned")
            .remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> UserRecord {
        UserRecord::new()
            .with_field("id", 1)
            .with_field("username", "mariano")
            .with_field("password", "hash")
            .with_field("created", "2007-03-17 01:16:23")
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryCredentialStore::new();
        store.insert("Users", sample_record()).await;

        let found = store
            .find_by_username("Users", "mariano", "all")
            .await
            .unwrap();
        assert_eq!(found, Some(sample_record()));

        let missing = store
            .find_by_username("Users", "larry", "all")
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_unknown_model_is_not_found() {
        let store = MemoryCredentialStore::new();
        let found = store
            .find_by_username("AuthUsers", "mariano", "all")
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_unknown_finder_errors() {
        let store = MemoryCredentialStore::new();
        store.insert("Users", sample_record()).await;

        let err = store
            .find_by_username("Users", "mariano", "bogus")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnknownFinder { name } if name == "bogus"));
    }

    #[tokio::test]
    async fn test_finder_projection() {
        let store = MemoryCredentialStore::new();
        store.insert("Users", sample_record()).await;
        store
            .register_finder("auth", |record| {
                let mut projected = record.clone();
                projected.remove("created");
                Some(projected)
            })
            .await;

        let found = store
            .find_by_username("Users", "mariano", "auth")
            .await
            .unwrap()
            .unwrap();
        assert!(!found.contains("created"));
        assert_eq!(found.get_str("username"), Some("mariano"));
    }

    #[tokio::test]
    async fn test_custom_username_field() {
        let store = MemoryCredentialStore::new().with_username_field("user");
        store
            .insert(
                "AuthUsers",
                UserRecord::new().with_field("id", 1).with_field("user", "mariano"),
            )
            .await;

        let found = store
            .find_by_username("AuthUsers", "mariano", "all")
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_clear_and_count() {
        let store = MemoryCredentialStore::new();
        store.insert("Users", sample_record()).await;
        assert_eq!(store.record_count("Users").await, 1);

        store.clear().await;
        assert_eq!(store.record_count("Users").await, 0);
    }

    #[tokio::test]
    async fn test_update_password_hash() {
        let store = MemoryCredentialStore::new();
        store.insert("Users", sample_record()).await;

        store
            .update_password_hash("Users", &json!(1), "newhash")
            .await
            .unwrap();
        let found = store
            .find_by_username("Users", "mariano", "all")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("password"), Some("newhash"));

        let err = store
            .update_password_hash("Users", &json!(42), "newhash")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Store { .. }));
    }

    #[test]
    fn test_session_round_trip() {
        let session = MemorySession::new();
        assert_eq!(session.read("two_step.credentials"), None);

        session.write("two_step.credentials", json!({"username": "nate"}));
        assert_eq!(
            session.read("two_step.credentials"),
            Some(json!({"username": "nate"}))
        );

        assert_eq!(
            session.delete("two_step.credentials"),
            Some(json!({"username": "nate"}))
        );
        assert_eq!(session.read("two_step.credentials"), None);
    }
}
