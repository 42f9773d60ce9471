//! Configuration for the form authenticator.

/// Names of the request/record fields carrying each credential role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field holding the username.
    pub username: String,
    /// Field holding the password (plaintext in requests, hash in records).
    pub password: String,
    /// Record field holding the one-time-code secret.
    pub secret: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            username: "username".to_string(),
            password: "password".to_string(),
            secret: "secret".to_string(),
        }
    }
}

impl FieldMapping {
    /// Creates a mapping with explicit field names.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            secret: secret.into(),
        }
    }
}

/// Configuration for [`FormAuthenticator`](crate::FormAuthenticator).
///
/// Immutable once an authenticator is constructed;
/// [`FormAuthenticator::reconfigure`](crate::FormAuthenticator::reconfigure)
/// builds a replacement instance (re-resolving the hasher) when settings
/// must change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorConfig {
    /// User model the credential store resolves records against.
    pub user_model: String,
    /// Request/record field names.
    pub fields: FieldMapping,
    /// Named finder the store applies to lookups.
    pub finder: String,
    /// Password hashing scheme, resolved by name at construction.
    pub password_hasher: String,
    /// Redirect target for the code verification round-trip.
    pub verify_action: String,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            user_model: "Users".to_string(),
            fields: FieldMapping::default(),
            finder: "all".to_string(),
            password_hasher: "Default".to_string(),
            verify_action: "verify".to_string(),
        }
    }
}

impl AuthenticatorConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user model.
    pub fn user_model(mut self, model: impl Into<String>) -> Self {
        self.user_model = model.into();
        self
    }

    /// Sets the field mapping.
    pub fn fields(mut self, fields: FieldMapping) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the finder name.
    pub fn finder(mut self, finder: impl Into<String>) -> Self {
        self.finder = finder.into();
        self
    }

    /// Sets the password hashing scheme by name.
    pub fn password_hasher(mut self, name: impl Into<String>) -> Self {
        self.password_hasher = name.into();
        self
    }

    /// Sets the verify redirect target.
    pub fn verify_action(mut self, action: impl Into<String>) -> Self {
        self.verify_action = action.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthenticatorConfig::default();
        assert_eq!(config.user_model, "Users");
        assert_eq!(config.fields.username, "username");
        assert_eq!(config.fields.password, "password");
        assert_eq!(config.fields.secret, "secret");
        assert_eq!(config.finder, "all");
        assert_eq!(config.password_hasher, "Default");
        assert_eq!(config.verify_action, "verify");
    }

    #[test]
    fn test_builder_settings() {
        let config = AuthenticatorConfig::new()
            .user_model("AuthUsers")
            .fields(FieldMapping::new("user", "password", "secret"))
            .finder("auth")
            .password_hasher("Legacy")
            .verify_action("account_verify");

        assert_eq!(config.user_model, "AuthUsers");
        assert_eq!(config.fields.username, "user");
        assert_eq!(config.finder, "auth");
        assert_eq!(config.password_hasher, "Legacy");
        assert_eq!(config.verify_action, "account_verify");
    }
}
