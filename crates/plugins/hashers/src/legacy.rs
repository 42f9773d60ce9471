//! The legacy salted-digest scheme.

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::PasswordHasher;
use twostep_auth_core::AuthResult;

/// Salted SHA-256 digests in `<salt>:<digest>` hex form.
///
/// Kept so databases hashed under the old scheme keep authenticating
/// while their records are rehashed; `needs_rehash` is always true.
#[derive(Debug, Clone, Default)]
pub struct LegacyHasher;

impl LegacyHasher {
    /// Creates the legacy hasher.
    pub fn new() -> Self {
        Self
    }

    fn digest(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hex_encode(&hasher.finalize())
    }
}

impl PasswordHasher for LegacyHasher {
    fn hash(&self, password: &str) -> AuthResult<String> {
        let mut salt_bytes = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = hex_encode(&salt_bytes);
        let digest = Self::digest(&salt, password);
        Ok(format!("{salt}:{digest}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Some((salt, digest)) = hash.split_once(':') else {
            return false;
        };
        let computed = Self::digest(salt, password);
        computed.as_bytes().ct_eq(digest.as_bytes()).into()
    }

    fn needs_rehash(&self, _hash: &str) -> bool {
        true
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = LegacyHasher::new();
        let hash = hasher.hash("password").unwrap();

        assert!(hasher.verify("password", &hash));
        assert!(!hasher.verify("wrongpassword", &hash));
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let hasher = LegacyHasher::new();
        let first = hasher.hash("password").unwrap();
        let second = hasher.hash("password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        let hasher = LegacyHasher::new();
        assert!(!hasher.verify("password", "no-separator"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_always_needs_rehash() {
        let hasher = LegacyHasher::new();
        let hash = hasher.hash("password").unwrap();
        assert!(hasher.needs_rehash(&hash));
    }
}
