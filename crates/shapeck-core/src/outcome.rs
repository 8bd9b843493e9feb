//! # Validation Outcome
//!
//! The result channel for value-shape mismatches. Messages are composed
//! bottom-up: a container prefixes `[key]`, a rule table prefixes the field
//! name, giving trails such as `address [2] expected is string, actual is number`.

use std::fmt;

use serde::Serialize;

use crate::error::ShapeError;

/// Success flag plus an optional failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Whether the value conforms.
    pub ok: bool,
    /// Path-annotated reason, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    /// A passing outcome.
    pub fn pass() -> Self {
        Self { ok: true, error: None }
    }

    /// A failing outcome with the given message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }

    /// Prepend one path segment to a failure message. Passing outcomes are
    /// returned unchanged.
    pub fn prefixed(self, prefix: &str) -> Self {
        if self.ok {
            return self;
        }
        let error = match self.error {
            Some(msg) => format!("{prefix} {msg}"),
            None => prefix.to_string(),
        };
        Self::fail(error)
    }

    /// Unwrap-or-fail: convert a failing outcome into
    /// [`ShapeError::Assertion`].
    ///
    /// `message` overrides the composed failure message when given.
    pub fn into_result(self, message: Option<&str>) -> Result<(), ShapeError> {
        if self.ok {
            return Ok(());
        }
        let message = match (message, self.error) {
            (Some(custom), _) => custom.to_string(),
            (None, Some(msg)) => msg,
            (None, None) => "validation failed".to_string(),
        };
        Err(ShapeError::Assertion { message })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ok, &self.error) {
            (true, _) => f.write_str("ok"),
            (false, Some(msg)) => f.write_str(msg),
            (false, None) => f.write_str("validation failed"),
        }
    }
}
