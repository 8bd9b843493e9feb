//! # Scalar, Mixed, and Container Validation
//!
//! [`validate_mixed`] checks one value against one descriptor and dispatches:
//!
//! 1. optional suffix: absent or null passes `T?` outright;
//! 2. container syntax: every entry is checked by [`validate_iterable`];
//! 3. predicate check: the predicate decides;
//! 4. enum check: the value must be a declared member value;
//! 5. otherwise the runtime kind name must equal the descriptor.
//!
//! The descriptor `string` is always satisfied in step 5, whatever the
//! value. Element checks inside containers have no such exception.

use std::fmt;

use serde_json::Value;

use crate::check::{is_enum_member, Check};
use crate::descriptor::{resolve_container, split_optional, ContainerKind};
use crate::error::ShapeError;
use crate::outcome::Outcome;

/// Descriptor that accepts any value at the top level.
pub const LENIENT_STRING: &str = "string";

/// Runtime kind name of a value, in `typeof` vocabulary.
///
/// Null, arrays, and objects all report `object`; absence reports
/// `undefined`.
pub fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Null | Value::Array(_) | Value::Object(_)) => "object",
    }
}

/// Render a value for an `actual is ...` message. Strings are written raw.
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Validate one value against one descriptor and optional check.
///
/// # Errors
///
/// Returns [`ShapeError`] only for malformed container descriptors. A value
/// that does not conform is `Ok` with `ok == false`.
pub fn validate_mixed(
    value: Option<&Value>,
    descriptor: &str,
    check: &Check,
) -> Result<Outcome, ShapeError> {
    let (bare, optional) = split_optional(descriptor);
    if optional && matches!(value, None | Some(Value::Null)) {
        return Ok(Outcome::pass());
    }

    if let Some(container) = resolve_container(bare)? {
        tracing::trace!(descriptor, kind = container.kind, "container dispatch");
        return Ok(match container.kind.parse::<ContainerKind>() {
            Ok(kind) => validate_container(kind, value, container.element, check),
            Err(unsupported) => Outcome::fail(unsupported.to_string()),
        });
    }

    let outcome = match check {
        Check::Predicate(predicate) => {
            if predicate.test(value) {
                Outcome::pass()
            } else {
                Outcome::fail(format!("expected is {bare}"))
            }
        }
        Check::Enum(definition) => {
            if is_enum_member(value, definition) {
                Outcome::pass()
            } else {
                Outcome::fail(format!(
                    "expected is {bare}, actual is {}",
                    render_value(value)
                ))
            }
        }
        Check::None => {
            let actual = kind_of(value);
            if bare == LENIENT_STRING || actual == bare {
                Outcome::pass()
            } else {
                Outcome::fail(format!("expected is {bare}, actual is {actual}"))
            }
        }
    };
    Ok(outcome)
}

/// Validate every entry of a sequence or keyed value against one element
/// descriptor and optional check.
///
/// Arrays are walked by index, objects by key in document order. The first
/// failing entry short-circuits with a `[key]`-prefixed message.
pub fn validate_iterable(value: Option<&Value>, element: &str, check: &Check) -> Outcome {
    match value {
        Some(Value::Array(items)) => check_entries(
            items.iter().enumerate().map(|(i, v)| (EntryKey::Index(i), v)),
            element,
            check,
        ),
        Some(Value::Object(map)) => check_entries(
            map.iter().map(|(k, v)| (EntryKey::Name(k), v)),
            element,
            check,
        ),
        _ => Outcome::fail("is not iterables type"),
    }
}

/// Entry point per container kind. The kind does not change how entries are
/// checked.
pub fn validate_container(
    kind: ContainerKind,
    value: Option<&Value>,
    element: &str,
    check: &Check,
) -> Outcome {
    tracing::trace!(%kind, element, "checking container entries");
    validate_iterable(value, element, check)
}

#[derive(Debug, Clone, Copy)]
enum EntryKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl fmt::Display for EntryKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Name(k) => write!(f, "[{k}]"),
        }
    }
}

fn check_entries<'v, I>(entries: I, element: &str, check: &Check) -> Outcome
where
    I: Iterator<Item = (EntryKey<'v>, &'v Value)>,
{
    for (key, entry) in entries {
        if let Some(failure) = check_entry(entry, element, check) {
            tracing::debug!(%key, element, "container entry rejected");
            return failure.prefixed(&key.to_string());
        }
    }
    Outcome::pass()
}

fn check_entry(entry: &Value, element: &str, check: &Check) -> Option<Outcome> {
    match check {
        Check::Predicate(predicate) => {
            (!predicate.test(Some(entry))).then(|| Outcome::fail(format!("expected is {element}")))
        }
        Check::Enum(definition) => (!definition.contains(entry)).then(|| {
            Outcome::fail(format!(
                "expected is {element}, actual is {}",
                render_value(Some(entry))
            ))
        }),
        Check::None => {
            let actual = kind_of(Some(entry));
            (actual != element)
                .then(|| Outcome::fail(format!("expected is {element}, actual is {actual}")))
        }
    }
}
