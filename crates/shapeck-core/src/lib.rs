//! # shapeck-core — Runtime Shape Validation
//!
//! Validates dynamically-typed values (`serde_json::Value`) against small
//! textual type descriptors, optionally paired with an enum or predicate
//! check, and reports a path-annotated reason on mismatch.
//!
//! ## Descriptors
//!
//! - `number`, `boolean`, `object`, ... — the value's runtime kind must match.
//! - `T?` — absent or null is accepted.
//! - `array<T>`, `map<T>`, `set<T>` — every entry must match `T`.
//! - `string` — accepted for **any** value at the top level. This leniency is
//!   deliberate and kept for compatibility; use an enum or predicate check
//!   when a real string is required. Inside containers `string` is strict.
//!
//! ## Entry Points
//!
//! - [`validate_mixed`] — one value, one descriptor.
//! - [`validate_iterable`] — every entry of an array or object.
//! - [`validate_dictionary`] — an object against a [`RuleTable`].
//! - [`assert_mixed`], [`assert_iterable`], [`assert_dictionary`],
//!   [`assert_dictionary_as`] — fail-fast adapters.
//! - [`construct_dictionary`], [`construct_dictionary_with`] — rebuild a
//!   keyed container behind a type guard.
//!
//! ## Error Channels
//!
//! A value that does not conform yields `Ok(Outcome { ok: false, .. })`.
//! [`ShapeError`] is reserved for mistakes in what the caller passed to the
//! engine: malformed descriptors, malformed rule tables, and failed
//! assertions.
//!
//! ```
//! use serde_json::json;
//! use shapeck_core::{validate_dictionary, RuleTable};
//!
//! let rules = RuleTable::new()
//!     .field("name", "string")
//!     .field("scores", "array<number>");
//! let outcome = validate_dictionary(&json!({"name": "x", "scores": [1, "2"]}), &rules).unwrap();
//! assert_eq!(outcome.error.as_deref(), Some("scores [1] expected is number, actual is string"));
//! ```
//!
//! ## Crate Policy
//!
//! - Stateless: nothing is cached between calls and values are never mutated.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod assert;
pub mod check;
pub mod construct;
pub mod descriptor;
pub mod error;
pub mod outcome;
pub mod rules;
pub mod validate;

pub use assert::{assert_dictionary, assert_dictionary_as, assert_iterable, assert_mixed};
pub use check::{Check, EnumDefinition, EnumValue, Predicate};
pub use construct::{construct_dictionary, construct_dictionary_with};
pub use descriptor::{parse_container, ContainerKind, ContainerSyntax};
pub use error::ShapeError;
pub use outcome::Outcome;
pub use rules::{validate_dictionary, Rule, RuleTable};
pub use validate::{kind_of, validate_container, validate_iterable, validate_mixed};
