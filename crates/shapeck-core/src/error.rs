//! # Error Types — Programmer-Error Channel
//!
//! Defines the error type raised by the engine when the *caller* got
//! something wrong: a descriptor that cannot be parsed, a rule table entry
//! of the wrong shape, or an assertion adapter asked to turn a failing
//! outcome into a hard failure.
//!
//! ## Design
//!
//! - A value that merely does not conform is never an error. It is reported
//!   as `Ok(Outcome { ok: false, .. })` by every validator.
//! - `ShapeError` is fatal to the immediate call and is propagated with `?`
//!   unmodified.

use thiserror::Error;

/// Errors raised for malformed inputs to the engine itself.
#[derive(Error, Debug)]
pub enum ShapeError {
    /// A container descriptor is missing its kind or its element descriptor.
    #[error("malformed type descriptor '{descriptor}': {reason}")]
    MalformedDescriptor {
        /// The descriptor as written by the caller.
        descriptor: String,
        /// What is missing.
        reason: &'static str,
    },

    /// A container descriptor nests another container in its element.
    #[error("nested container descriptor '{descriptor}' is not supported")]
    NestedContainer {
        /// The descriptor as written by the caller.
        descriptor: String,
    },

    /// A rule table entry is neither a descriptor nor a descriptor+check pair.
    #[error("rule '{name}' is invalid")]
    InvalidRule {
        /// Field name of the offending rule.
        name: String,
    },

    /// An enum definition carries a member that is not a number or string.
    #[error("enum member '{member}' is invalid: {reason}")]
    InvalidEnum {
        /// Member name (or `<root>` when the definition itself is malformed).
        member: String,
        /// Why the member was rejected.
        reason: String,
    },

    /// An assertion adapter was given a value that failed validation.
    #[error("{message}")]
    Assertion {
        /// Validator message, or the caller-supplied override.
        message: String,
    },

    /// A value passed validation but could not be deserialized into the
    /// caller's type.
    #[error("validated value does not fit target type: {0}")]
    Narrowing(#[from] serde_json::Error),

    /// A dictionary source entry was rejected by the caller's type guard.
    #[error("entry '{key}' rejected by type guard")]
    GuardRejected {
        /// Key of the rejected entry.
        key: String,
    },

    /// A dictionary source is not an object.
    #[error("source is not an object (found {kind})")]
    NotAnObject {
        /// Runtime kind name of the source.
        kind: &'static str,
    },
}
