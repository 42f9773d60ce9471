//! Credential extraction.

use serde_json::Value;

use crate::PENDING_CREDENTIALS_KEY;
use crate::config::FieldMapping;
use twostep_auth_core::{AuthRequest, Credentials, SessionStore};

/// Credentials as extracted from a request or from pending session
/// state, before the scalar-type guard has run.
///
/// Values are kept raw: extraction reports *presence*, and rejecting an
/// empty or mistyped value is verification's job.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCredentials {
    /// The submitted username value, verbatim.
    pub username: Value,
    /// The submitted password value, verbatim.
    pub password: Value,
}

impl RawCredentials {
    /// Applies the scalar-type guard: both values must be plain strings.
    /// Collection, numeric, and null values never reach the store or the
    /// hashing layer.
    pub fn to_scalar(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Value::String(username), Value::String(password)) => {
                Some(Credentials::new(username.clone(), password.clone()))
            }
            _ => None,
        }
    }
}

/// Pulls credentials from the request body, falling back to pending
/// session state.
///
/// Request fields win whenever both configured fields are present, and
/// their values are taken verbatim, empty strings included. Pending
/// state is only consulted when the request carries no credentials of
/// its own.
pub(crate) fn extract(
    request: &AuthRequest,
    session: &dyn SessionStore,
    fields: &FieldMapping,
) -> Option<RawCredentials> {
    if let (Some(username), Some(password)) = (
        request.field(&fields.username),
        request.field(&fields.password),
    ) {
        return Some(RawCredentials {
            username: username.clone(),
            password: password.clone(),
        });
    }

    let pending = session.read(PENDING_CREDENTIALS_KEY)?;
    let credentials: Credentials = serde_json::from_value(pending).ok()?;
    Some(RawCredentials {
        username: Value::String(credentials.username),
        password: Value::String(credentials.password),
    })
}
