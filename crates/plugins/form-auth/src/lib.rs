//! # Twostep Auth Form Authenticator
//!
//! The two-step authentication state machine: a username/password check
//! first, then a time-based one-time code for any user whose record
//! carries a secret. The authenticator owns all branching logic between
//! those steps; the credential store, session, and host coordinator stay
//! behind the traits in `twostep_auth_core`.
//!
//! A user without a secret authenticates on password alone, exactly as a
//! classic form login would. A user with a secret is parked in
//! pending-login session state after the password step and redirected to
//! the verify action; the verification endpoint feeds the submitted code
//! back through [`FormAuthenticator::authenticate`], which picks the
//! parked credentials back up from the session.

mod config;
mod extract;

pub use config::{AuthenticatorConfig, FieldMapping};
pub use extract::RawCredentials;

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use twostep_auth_core::{
    AuthError, AuthRequest, AuthResult, Coordinator, CredentialStore, SessionStore, UserRecord,
};
use twostep_auth_hashers::{HasherRegistry, PasswordHasher};
use twostep_auth_totp::TotpVerifier;

/// Session key holding in-flight credentials between the password step
/// and the code step.
pub const PENDING_CREDENTIALS_KEY: &str = "two_step.credentials";

/// Request body field carrying the submitted one-time code.
pub const CODE_FIELD: &str = "code";

/// Message flashed when a submitted code does not match.
pub const INVALID_CODE_MESSAGE: &str = "Invalid two-step verification code.";

/// Outcome of a single authentication attempt.
///
/// The two unauthenticated mid-flow outcomes are deliberately distinct:
/// `CodeRequired` is the silent leg of the round-trip (the user simply
/// has not submitted a code yet), while `CodeRejected` carries the
/// user-facing "invalid code" side effect. Both answer `false` to
/// [`is_authenticated`](AuthOutcome::is_authenticated).
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Fully authenticated. `user` is the configured finder's exact
    /// projection minus the password and secret fields; `needs_rehash`
    /// advises whether the stored hash should be regenerated under the
    /// configured scheme.
    Authenticated {
        user: UserRecord,
        needs_rehash: bool,
    },
    /// Password verified, but the account requires a code and none was
    /// submitted. Pending state was written and the caller redirected to
    /// the verify action, with no error message.
    CodeRequired,
    /// A submitted code did not match. An error was flashed and the
    /// caller redirected; pending state is left intact for a retry.
    CodeRejected,
    /// The attempt failed outright: no credentials, malformed
    /// credentials, unknown user, or wrong password.
    Denied,
}

impl AuthOutcome {
    /// Returns true only for full authentication.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// The two-step form authenticator.
///
/// Construction fails with a configuration error when the host
/// coordinator cannot route the code verification round-trip, or when
/// the configured hasher name is unknown; both checks run up front so a
/// miswired host cannot silently drop the second factor.
pub struct FormAuthenticator {
    config: AuthenticatorConfig,
    store: Arc<dyn CredentialStore>,
    coordinator: Arc<dyn Coordinator>,
    hasher: Arc<dyn PasswordHasher>,
    totp: TotpVerifier,
}

impl std::fmt::Debug for FormAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormAuthenticator")
            .field("config", &self.config)
            .field("totp", &self.totp)
            .finish_non_exhaustive()
    }
}

impl FormAuthenticator {
    /// Creates an authenticator using the built-in hasher registry.
    pub fn new(
        config: AuthenticatorConfig,
        store: Arc<dyn CredentialStore>,
        coordinator: Arc<dyn Coordinator>,
    ) -> AuthResult<Self> {
        Self::with_registry(config, store, coordinator, &HasherRegistry::new())
    }

    /// Creates an authenticator resolving the hasher from a caller-owned
    /// registry.
    pub fn with_registry(
        config: AuthenticatorConfig,
        store: Arc<dyn CredentialStore>,
        coordinator: Arc<dyn Coordinator>,
        registry: &HasherRegistry,
    ) -> AuthResult<Self> {
        if !coordinator.handles_code_verification() {
            return Err(AuthError::config(
                "host coordinator does not handle the code verification round-trip",
            ));
        }
        let hasher = registry.resolve(&config.password_hasher)?;
        Ok(Self {
            config,
            store,
            coordinator,
            hasher,
            totp: TotpVerifier::default(),
        })
    }

    /// Replaces the code verifier (digit count, step length).
    pub fn with_totp(mut self, totp: TotpVerifier) -> Self {
        self.totp = totp;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AuthenticatorConfig {
        &self.config
    }

    /// Builds a replacement authenticator with new settings, re-running
    /// the construction checks. The store and coordinator carry over.
    pub fn reconfigure(self, config: AuthenticatorConfig) -> AuthResult<Self> {
        Self::new(config, self.store, self.coordinator)
    }

    /// Extracts credentials for this attempt: request body first,
    /// pending session state second.
    pub fn extract(
        &self,
        request: &AuthRequest,
        session: &dyn SessionStore,
    ) -> Option<RawCredentials> {
        extract::extract(request, session, &self.config.fields)
    }

    /// Runs one authentication attempt.
    ///
    /// Verification failures come back as outcomes, not errors; `Err` is
    /// reserved for store failures, which propagate unchanged.
    pub async fn authenticate(
        &self,
        request: &AuthRequest,
        session: &dyn SessionStore,
    ) -> AuthResult<AuthOutcome> {
        let Some(raw) = self.extract(request, session) else {
            debug!("no credentials in request or pending state");
            return Ok(AuthOutcome::Denied);
        };
        let Some(credentials) = raw.to_scalar() else {
            debug!("credential fields failed the scalar guard");
            return Ok(AuthOutcome::Denied);
        };

        let fields = &self.config.fields;
        let found = self
            .store
            .find_by_username(&self.config.user_model, &credentials.username, &self.config.finder)
            .await?;
        let Some(record) = found else {
            debug!(username = %credentials.username, "no matching user record");
            return Ok(AuthOutcome::Denied);
        };

        let Some(stored_hash) = record.get_str(&fields.password) else {
            debug!(username = %credentials.username, "record carries no scalar password hash");
            return Ok(AuthOutcome::Denied);
        };
        if !self.hasher.verify(&credentials.password, stored_hash) {
            debug!(username = %credentials.username, "password mismatch");
            return Ok(AuthOutcome::Denied);
        }
        let needs_rehash = self.hasher.needs_rehash(stored_hash);

        let secret = record
            .get_str(&fields.secret)
            .filter(|secret| !secret.is_empty())
            .map(str::to_owned);
        let Some(secret) = secret else {
            // Single-factor parity: no secret, password alone decides.
            return Ok(AuthOutcome::Authenticated {
                user: self.identity(record),
                needs_rehash,
            });
        };

        match request.field(CODE_FIELD) {
            None => {
                session.write(
                    PENDING_CREDENTIALS_KEY,
                    serde_json::to_value(&credentials)?,
                );
                self.coordinator.redirect_to(&self.config.verify_action);
                debug!(username = %credentials.username, "one-time code required");
                Ok(AuthOutcome::CodeRequired)
            }
            Some(code) => {
                let candidate = code.as_str().unwrap_or_default();
                let now = Utc::now().timestamp().max(0) as u64;
                if self.totp.verify_at(&secret, candidate, now) {
                    session.delete(PENDING_CREDENTIALS_KEY);
                    debug!(username = %credentials.username, "one-time code accepted");
                    Ok(AuthOutcome::Authenticated {
                        user: self.identity(record),
                        needs_rehash,
                    })
                } else {
                    self.coordinator.flash_error(INVALID_CODE_MESSAGE);
                    self.coordinator.redirect_to(&self.config.verify_action);
                    debug!(username = %credentials.username, "one-time code rejected");
                    Ok(AuthOutcome::CodeRejected)
                }
            }
        }
    }

    /// The identity handed back to callers: the finder's projection with
    /// the password and secret fields stripped.
    fn identity(&self, mut record: UserRecord) -> UserRecord {
        record.remove(&self.config.fields.password);
        record.remove(&self.config.fields.secret);
        record
    }
}
