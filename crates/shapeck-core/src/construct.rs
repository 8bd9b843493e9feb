//! # Dictionary Construction
//!
//! Rebuild a keyed container from a raw object whose values must all pass a
//! caller-supplied type guard. Values are either copied as they are or
//! passed through a creator function.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ShapeError;
use crate::validate::kind_of;

/// Copy every entry of `source` after checking it with `guard`.
///
/// Entry order follows the source object.
///
/// # Errors
///
/// - [`ShapeError::NotAnObject`] if `source` is not an object.
/// - [`ShapeError::GuardRejected`] for the first entry `guard` refuses.
pub fn construct_dictionary<G>(source: &Value, guard: G) -> Result<Map<String, Value>, ShapeError>
where
    G: Fn(&Value) -> bool,
{
    guarded_entries(source, guard)?
        .map(|entry| entry.map(|(key, value)| (key.clone(), value.clone())))
        .collect()
}

/// Build a map from `source`, converting each guarded value with `creator`.
///
/// # Errors
///
/// Same as [`construct_dictionary`].
pub fn construct_dictionary_with<T, G, C>(
    source: &Value,
    guard: G,
    creator: C,
) -> Result<BTreeMap<String, T>, ShapeError>
where
    G: Fn(&Value) -> bool,
    C: Fn(&Value) -> T,
{
    guarded_entries(source, guard)?
        .map(|entry| entry.map(|(key, value)| (key.clone(), creator(value))))
        .collect()
}

fn guarded_entries<'v, G>(
    source: &'v Value,
    guard: G,
) -> Result<impl Iterator<Item = Result<(&'v String, &'v Value), ShapeError>>, ShapeError>
where
    G: Fn(&Value) -> bool,
{
    let Value::Object(map) = source else {
        return Err(ShapeError::NotAnObject {
            kind: kind_of(Some(source)),
        });
    };
    Ok(map.iter().map(move |(key, value)| {
        if guard(value) {
            Ok((key, value))
        } else {
            Err(ShapeError::GuardRejected { key: key.clone() })
        }
    }))
}
