//! The preferred Argon2id scheme.

use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::Argon2;

use crate::legacy::LegacyHasher;
use crate::PasswordHasher;
use twostep_auth_core::{AuthError, AuthResult};

const ARGON2ID: &str = "argon2id";

/// Argon2id PHC-string hashing, the "Default" scheme.
///
/// Stored hashes carry their own scheme marker, so verification also
/// accepts hashes produced under the legacy digest scheme; those verify
/// but report `needs_rehash`, letting callers upgrade records as users
/// log in.
#[derive(Default)]
pub struct DefaultHasher {
    argon2: Argon2<'static>,
    legacy: LegacyHasher,
}

impl DefaultHasher {
    /// Creates the default hasher.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for DefaultHasher {
    fn hash(&self, password: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| AuthError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => self.legacy.verify(password, hash),
        }
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => parsed.algorithm.as_str() != ARGON2ID,
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = DefaultHasher::new();
        let hash = hasher.hash("mypassword").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("mypassword", &hash));
        assert!(!hasher.verify("wrongpassword", &hash));
    }

    #[test]
    fn test_own_hashes_do_not_need_rehash() {
        let hasher = DefaultHasher::new();
        let hash = hasher.hash("mypassword").unwrap();
        assert!(!hasher.needs_rehash(&hash));
    }

    #[test]
    fn test_verifies_legacy_hashes_and_flags_rehash() {
        let hasher = DefaultHasher::new();
        let legacy_hash = LegacyHasher::new().hash("mypassword").unwrap();

        assert!(hasher.verify("mypassword", &legacy_hash));
        assert!(!hasher.verify("wrongpassword", &legacy_hash));
        assert!(hasher.needs_rehash(&legacy_hash));
    }

    #[test]
    fn test_garbage_hash_fails_closed() {
        let hasher = DefaultHasher::new();
        assert!(!hasher.verify("mypassword", "garbage"));
        assert!(hasher.needs_rehash("garbage"));
    }
}
