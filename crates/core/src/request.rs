//! Framework-agnostic request data.

use serde_json::Value;
use std::collections::HashMap;

/// The slice of an inbound request the authentication core consumes:
/// the parsed body fields.
///
/// Values are kept as raw JSON so that malformed submissions (arrays
/// where strings are expected, nulls, and so on) survive extraction and
/// can be rejected by the verification layer rather than coerced away.
#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    body: HashMap<String, Value>,
}

impl AuthRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body field, consuming and returning the request.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }

    /// Gets a body field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// Returns true if the body carries the named field, whatever its value.
    pub fn has_field(&self, name: &str) -> bool {
        self.body.contains_key(name)
    }
}
