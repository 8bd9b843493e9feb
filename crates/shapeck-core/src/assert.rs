//! # Assertion Adapters
//!
//! Fail-fast wrappers over the validators. Each runs its validator and turns
//! a failing [`Outcome`](crate::Outcome) into
//! [`ShapeError::Assertion`], carrying the composed message or the caller's
//! override. Programmer errors from the validator pass through unchanged.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::check::Check;
use crate::error::ShapeError;
use crate::rules::{validate_dictionary, RuleTable};
use crate::validate::{validate_iterable, validate_mixed};

/// Assert that `value` matches `descriptor` and `check`.
pub fn assert_mixed(
    value: Option<&Value>,
    descriptor: &str,
    check: &Check,
    message: Option<&str>,
) -> Result<(), ShapeError> {
    validate_mixed(value, descriptor, check)?.into_result(message)
}

/// Assert that every entry of `value` matches `element` and `check`.
pub fn assert_iterable(
    value: Option<&Value>,
    element: &str,
    check: &Check,
    message: Option<&str>,
) -> Result<(), ShapeError> {
    validate_iterable(value, element, check).into_result(message)
}

/// Assert that `value` satisfies every rule in `table`.
pub fn assert_dictionary(
    value: &Value,
    table: &RuleTable,
    message: Option<&str>,
) -> Result<(), ShapeError> {
    validate_dictionary(value, table)?.into_result(message)
}

/// Assert `value` against `table`, then deserialize it into `T`.
///
/// This is the typed counterpart of [`assert_dictionary`]: once the rule
/// table has accepted the value, callers work with a concrete type.
///
/// # Errors
///
/// [`ShapeError::Assertion`] if validation fails, [`ShapeError::Narrowing`]
/// if the validated value does not deserialize into `T`.
pub fn assert_dictionary_as<T: DeserializeOwned>(
    value: &Value,
    table: &RuleTable,
    message: Option<&str>,
) -> Result<T, ShapeError> {
    assert_dictionary(value, table, message)?;
    Ok(T::deserialize(value)?)
}
