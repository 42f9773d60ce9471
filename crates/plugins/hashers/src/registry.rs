//! By-name password hasher selection.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{DefaultHasher, LegacyHasher, PasswordHasher};
use twostep_auth_core::{AuthError, AuthResult};

/// Registry of hashing schemes keyed by configuration name.
///
/// "Default" and "Legacy" are pre-registered; hosts may add their own
/// schemes. Consumers resolve a name once at construction time and hold
/// the returned handle, rather than re-resolving per verification.
pub struct HasherRegistry {
    hashers: HashMap<String, Arc<dyn PasswordHasher>>,
}

impl HasherRegistry {
    /// Creates a registry with the built-in schemes.
    pub fn new() -> Self {
        let mut hashers: HashMap<String, Arc<dyn PasswordHasher>> = HashMap::new();
        hashers.insert("Default".to_string(), Arc::new(DefaultHasher::new()));
        hashers.insert("Legacy".to_string(), Arc::new(LegacyHasher::new()));
        Self { hashers }
    }

    /// Registers a scheme under a name, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, hasher: Arc<dyn PasswordHasher>) {
        self.hashers.insert(name.into(), hasher);
    }

    /// Resolves a scheme by name.
    pub fn resolve(&self, name: &str) -> AuthResult<Arc<dyn PasswordHasher>> {
        self.hashers
            .get(name)
            .cloned()
            .ok_or_else(|| AuthError::UnknownHasher {
                name: name.to_string(),
            })
    }
}

impl Default for HasherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemes_resolve() {
        let registry = HasherRegistry::new();
        assert!(registry.resolve("Default").is_ok());
        assert!(registry.resolve("Legacy").is_ok());
    }

    #[test]
    fn test_unknown_scheme_errors() {
        let registry = HasherRegistry::new();
        let err = registry.resolve("Bogus").unwrap_err();
        assert!(matches!(err, AuthError::UnknownHasher { name } if name == "Bogus"));
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = HasherRegistry::new();
        registry.register("Custom", Arc::new(LegacyHasher::new()));

        let hasher = registry.resolve("Custom").unwrap();
        let hash = hasher.hash("password").unwrap();
        assert!(hasher.verify("password", &hash));
    }
}
