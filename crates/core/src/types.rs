//! Core data types for Twostep Auth.
//!
//! This module defines the `UserRecord` and `Credentials` types that flow
//! through every authentication attempt.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A user record as projected by a credential store finder.
///
/// Records are open field maps rather than fixed structs: the configured
/// finder decides which fields are present (computed fields included),
/// and the authenticator's field mapping decides which of them carry the
/// username, the password hash, and the one-time-code secret.
///
/// # Example
///
/// ```rust
/// use twostep_auth_core::UserRecord;
///
/// let record = UserRecord::new()
///     .with_field("id", 1)
///     .with_field("username", "mariano");
/// assert_eq!(record.get_str("username"), Some("mariano"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    /// The record's fields, keyed by column/attribute name.
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl UserRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, consuming and returning the record.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Gets a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Gets a field as a string slice, if present and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Sets a field value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Removes a field, returning its value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Returns true if the record carries the named field.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// An in-flight username/password pair.
///
/// Plaintext and transient: a `Credentials` value exists only within a
/// single authentication attempt or inside pending-login session state,
/// and is never persisted anywhere else. The `Debug` impl redacts the
/// password so the plaintext cannot leak through logging.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// The submitted username.
    pub username: String,
    /// The submitted plaintext password.
    pub password: String,
}

impl Credentials {
    /// Creates a new credentials pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
