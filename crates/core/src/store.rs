//! Credential storage as seen by the authentication core.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AuthResult;
use crate::types::UserRecord;

/// Trait for credential stores (database backends).
///
/// The store owns record lookup and the shaping of what a lookup
/// returns: `finder` names a store-registered projection, and the
/// returned record must carry every field that projection yields,
/// computed fields included. The core never interprets store failures;
/// they propagate unchanged to the caller.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Looks up a user record by username.
    ///
    /// `model` selects the record collection (the configured user model)
    /// and `finder` the projection applied to a match. Returns `Ok(None)`
    /// when no record matches; `Err` only for store-level failures such
    /// as an unknown finder.
    async fn find_by_username(
        &self,
        model: &str,
        username: &str,
        finder: &str,
    ) -> AuthResult<Option<UserRecord>>;

    /// Replaces the stored password hash of the identified record.
    ///
    /// Called by hosts acting on an advisory needs-rehash flag; the core
    /// itself never rewrites hashes.
    async fn update_password_hash(
        &self,
        model: &str,
        identifier: &Value,
        new_hash: &str,
    ) -> AuthResult<()>;
}
