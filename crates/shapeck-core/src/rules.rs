//! # Rule Tables
//!
//! A rule table maps field names to rules and is applied to a
//! dictionary-shaped value field by field, in table order. The first failing
//! field ends validation and its name is prefixed onto the message.
//!
//! The table is a whitelist of checks: fields present in the value but not
//! declared in the table are never inspected.
//!
//! ## Loading from documents
//!
//! [`RuleTable::from_value`] reads a table from parsed JSON/YAML:
//!
//! ```yaml
//! name: string
//! age: number?
//! status:
//!   type: number
//!   enum: { Active: 1, Suspended: 2 }
//! ```
//!
//! Predicates cannot be expressed in a document and are only available
//! through the builder API.

use serde_json::Value;

use crate::check::{Check, EnumDefinition};
use crate::error::ShapeError;
use crate::outcome::Outcome;
use crate::validate::{kind_of, validate_mixed};

/// One field's rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Bare type descriptor.
    Type(String),
    /// Descriptor with a companion check.
    Checked {
        /// Type descriptor.
        descriptor: String,
        /// Enum or predicate check.
        check: Check,
    },
}

impl Rule {
    /// Build a [`Rule::Checked`].
    pub fn checked(descriptor: impl Into<String>, check: impl Into<Check>) -> Self {
        Self::Checked {
            descriptor: descriptor.into(),
            check: check.into(),
        }
    }

    /// The rule's descriptor.
    pub fn descriptor(&self) -> &str {
        match self {
            Self::Type(d) => d,
            Self::Checked { descriptor, .. } => descriptor,
        }
    }

    /// The rule's check ([`Check::None`] for bare descriptors).
    pub fn check(&self) -> &Check {
        static NONE: Check = Check::None;
        match self {
            Self::Type(_) => &NONE,
            Self::Checked { check, .. } => check,
        }
    }

    /// Validate a single field value against this rule.
    ///
    /// # Errors
    ///
    /// Propagates [`ShapeError`] from a malformed descriptor.
    pub fn validate(&self, value: Option<&Value>) -> Result<Outcome, ShapeError> {
        validate_mixed(value, self.descriptor(), self.check())
    }

    fn from_entry(name: &str, entry: &Value) -> Result<Self, ShapeError> {
        let invalid = || ShapeError::InvalidRule {
            name: name.to_string(),
        };
        match entry {
            Value::String(descriptor) => Ok(Self::Type(descriptor.clone())),
            Value::Object(parts) => {
                if parts.keys().any(|k| k != "type" && k != "enum") {
                    return Err(invalid());
                }
                let descriptor = parts
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(invalid)?;
                let check = match parts.get("enum") {
                    None => Check::None,
                    Some(def) => Check::Enum(EnumDefinition::from_value(def)?),
                };
                Ok(Self::Checked {
                    descriptor: descriptor.to_string(),
                    check,
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl From<&str> for Rule {
    fn from(descriptor: &str) -> Self {
        Self::Type(descriptor.to_string())
    }
}

impl From<String> for Rule {
    fn from(descriptor: String) -> Self {
        Self::Type(descriptor)
    }
}

/// Ordered field-to-rule mapping with unique names.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<(String, Rule)>,
}

impl RuleTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RuleTable::insert`].
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.insert(name, rule);
        self
    }

    /// Declare a field. Re-declaring a name replaces its rule in place.
    pub fn insert(&mut self, name: impl Into<String>, rule: impl Into<Rule>) {
        let name = name.into();
        let rule = rule.into();
        match self.rules.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((name, rule)),
        }
    }

    /// Look up a field's rule.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    /// Iterate declared fields in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Load a table from a parsed document.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::InvalidRule`] if the document is not an object, or an
    ///   entry is neither a descriptor string nor a `{type, enum?}` object.
    /// - [`ShapeError::InvalidEnum`] if an `enum` entry is malformed.
    pub fn from_value(value: &Value) -> Result<Self, ShapeError> {
        let Value::Object(entries) = value else {
            return Err(ShapeError::InvalidRule {
                name: "<root>".to_string(),
            });
        };
        let mut table = Self::new();
        for (name, entry) in entries {
            table.insert(name.clone(), Rule::from_entry(name, entry)?);
        }
        Ok(table)
    }
}

impl<N: Into<String>, R: Into<Rule>> FromIterator<(N, R)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, rule) in iter {
            table.insert(name, rule);
        }
        table
    }
}

/// Validate a dictionary-shaped value against a rule table.
///
/// Anything other than a JSON object fails with `is not object`. Absent
/// fields are validated as absent, so optional descriptors accept them.
///
/// # Errors
///
/// Propagates [`ShapeError`] from a malformed descriptor in the table.
pub fn validate_dictionary(value: &Value, table: &RuleTable) -> Result<Outcome, ShapeError> {
    let Value::Object(fields) = value else {
        tracing::debug!(kind = kind_of(Some(value)), "dictionary input is not an object");
        return Ok(Outcome::fail("is not object"));
    };

    for (name, rule) in table.iter() {
        let outcome = rule.validate(fields.get(name))?;
        if !outcome.ok {
            tracing::debug!(field = name, "field rejected");
            return Ok(outcome.prefixed(name));
        }
    }
    Ok(Outcome::pass())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> RuleTable {
        RuleTable::new()
            .field("name", "string")
            .field("age", Rule::checked("number?", Check::None))
    }

    #[test]
    fn optional_field_may_be_absent() {
        assert!(validate_dictionary(&json!({"name": "x"}), &person()).unwrap().ok);
    }

    #[test]
    fn failure_is_prefixed_with_field_name() {
        let table = RuleTable::new().field("name", "number");
        let out = validate_dictionary(&json!({"name": "x"}), &table).unwrap();
        assert_eq!(out.error.as_deref(), Some("name expected is number, actual is string"));
    }

    #[test]
    fn string_field_is_lenient() {
        assert!(validate_dictionary(&json!({"name": 1}), &person()).unwrap().ok);
    }

    #[test]
    fn non_object_input_fails() {
        for v in [json!(42), json!("s"), json!(null), json!([1, 2])] {
            let out = validate_dictionary(&v, &person()).unwrap();
            assert_eq!(out.error.as_deref(), Some("is not object"));
        }
        let out = validate_dictionary(&json!(42), &RuleTable::new()).unwrap();
        assert_eq!(out.error.as_deref(), Some("is not object"));
    }

    #[test]
    fn undeclared_fields_are_ignored() {
        let out = validate_dictionary(&json!({"name": "x", "extra": [1, 2]}), &person()).unwrap();
        assert!(out.ok);
    }

    #[test]
    fn first_failing_field_in_table_order_is_reported() {
        let table = RuleTable::new().field("b", "number").field("a", "boolean");
        let out = validate_dictionary(&json!({"a": 1, "b": "x"}), &table).unwrap();
        assert_eq!(out.error.as_deref(), Some("b expected is number, actual is string"));
    }

    #[test]
    fn container_path_trail() {
        let table = RuleTable::new().field("address", "array<string>");
        let out = validate_dictionary(&json!({"address": ["a", "b", 3]}), &table).unwrap();
        assert_eq!(
            out.error.as_deref(),
            Some("address [2] expected is string, actual is number")
        );
    }

    #[test]
    fn enum_rule() {
        let table = RuleTable::new().field(
            "status",
            Rule::checked("number", EnumDefinition::new([("Active", 1), ("Suspended", 2)])),
        );
        assert!(validate_dictionary(&json!({"status": 2}), &table).unwrap().ok);
        let out = validate_dictionary(&json!({"status": 9}), &table).unwrap();
        assert_eq!(out.error.as_deref(), Some("status expected is number, actual is 9"));
    }

    #[test]
    fn malformed_descriptor_propagates() {
        let table = RuleTable::new().field("tags", "array<");
        let err = validate_dictionary(&json!({"tags": []}), &table).unwrap_err();
        assert!(matches!(err, ShapeError::MalformedDescriptor { .. }));
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let table = RuleTable::new()
            .field("a", "number")
            .field("b", "number")
            .field("a", "boolean");
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(table.get("a").map(Rule::descriptor), Some("boolean"));
    }

    #[test]
    fn from_value_reads_both_rule_shapes() {
        let table = RuleTable::from_value(&json!({
            "name": "string",
            "status": {"type": "number", "enum": {"Active": 1}},
            "nick": {"type": "string?"}
        }))
        .unwrap();
        assert_eq!(table.len(), 3);
        assert!(matches!(table.get("status").map(Rule::check), Some(Check::Enum(_))));
        assert!(matches!(table.get("nick").map(Rule::check), Some(Check::None)));
    }

    #[test]
    fn from_value_rejects_bad_rules() {
        for bad in [
            json!({"age": 5}),
            json!({"age": {"enum": {"A": 1}}}),
            json!({"age": {"type": "number", "check": "x"}}),
            json!({"age": ["number"]}),
        ] {
            let err = RuleTable::from_value(&bad).unwrap_err();
            assert_eq!(err.to_string(), "rule 'age' is invalid");
        }
    }

    #[test]
    fn rule_shape_is_checked_before_enum_members() {
        let err = RuleTable::from_value(&json!({
            "level": {"type": "number", "enum": {"A": true}, "x": 1}
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "rule 'level' is invalid");

        let err = RuleTable::from_value(&json!({
            "level": {"type": 3, "enum": {"A": true}}
        }))
        .unwrap_err();
        assert!(matches!(err, ShapeError::InvalidRule { .. }));
    }

    #[test]
    fn from_iterator_collects() {
        let table: RuleTable = [("x", "number"), ("y", "boolean")].into_iter().collect();
        assert_eq!(table.len(), 2);
    }
}
