//! Session access as seen by the authentication core.

use serde_json::Value;

/// Key/value view of the host framework's session.
///
/// The authenticator receives a session handle with every attempt and
/// uses it for exactly one thing: pending-login state between the
/// password step and the code step. Session storage mechanics (cookies,
/// backends, expiry) belong to the host.
///
/// A session is evaluated by one request at a time in the supported
/// deployment model; implementations targeting concurrent hosts must
/// serialize access per session themselves.
pub trait SessionStore: Send + Sync {
    /// Reads a value by key.
    fn read(&self, key: &str) -> Option<Value>;

    /// Writes a value under a key, replacing any previous value.
    fn write(&self, key: &str, value: Value);

    /// Deletes a key, returning the removed value if it existed.
    fn delete(&self, key: &str) -> Option<Value>;
}
