//! # Twostep Auth Password Hashers
//!
//! Selectable password hashing schemes behind a common trait, chosen by
//! configuration name through [`HasherRegistry`]. "Default" is Argon2id;
//! "Legacy" is the salted-digest scheme older databases carry. The
//! default scheme verifies legacy hashes too, so records migrate on
//! login instead of locking users out.

mod default;
mod legacy;
mod registry;

pub use default::DefaultHasher;
pub use legacy::LegacyHasher;
pub use registry::HasherRegistry;

use twostep_auth_core::AuthResult;

/// A password hashing scheme.
///
/// `verify` reports a plain mismatch as `false`, never as an error.
/// `needs_rehash` is advisory: it reports whether a stored hash should
/// be regenerated under the currently preferred scheme. Whether and when
/// to rewrite the stored hash is the caller's decision.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    fn hash(&self, password: &str) -> AuthResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Whether the stored hash should be regenerated under the
    /// preferred scheme.
    fn needs_rehash(&self, hash: &str) -> bool;
}

impl std::fmt::Debug for dyn PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHasher")
    }
}
