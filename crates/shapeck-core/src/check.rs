//! # Check Specifiers
//!
//! The optional companion to a type descriptor. A check either constrains
//! the value to a closed enumeration of primitive values, or hands it to a
//! caller-supplied predicate.
//!
//! Enum membership is tested against the set of declared member *values*.
//! Member names are not members, and no other key of the definition can
//! satisfy the test.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::ShapeError;

/// A declared enum member value.
///
/// Numeric members keep their JSON representation. Two integers compare
/// exactly, so members beyond 2^53 stay distinct; any comparison involving
/// a float falls back to `f64` equality (`1` matches `1.0`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// Numeric member.
    Number(Number),
    /// String member.
    String(String),
}

impl EnumValue {
    /// True if `value` is this member.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Number(n), Value::Number(v)) => numbers_equal(n, v),
            (Self::String(s), Value::String(v)) => s == v,
            _ => false,
        }
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if a.is_f64() || b.is_f64() {
        return a.as_f64() == b.as_f64();
    }
    // One negative integer, one integer above i64::MAX.
    false
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<Number> for EnumValue {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for EnumValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for EnumValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for EnumValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for EnumValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// A closed enumeration: ordered `name -> value` members.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EnumDefinition {
    members: Vec<(String, EnumValue)>,
}

impl EnumDefinition {
    /// Build a definition from `(name, value)` pairs.
    ///
    /// A repeated name keeps its first position and takes the later value.
    pub fn new<N, V, I>(members: I) -> Self
    where
        N: Into<String>,
        V: Into<EnumValue>,
        I: IntoIterator<Item = (N, V)>,
    {
        let mut def = Self::default();
        for (name, value) in members {
            def.insert(name.into(), value.into());
        }
        def
    }

    fn insert(&mut self, name: String, value: EnumValue) {
        match self.members.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.members.push((name, value)),
        }
    }

    /// Build a definition from a JSON object of `name: number | string`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidEnum`] if `value` is not an object or any
    /// member value is neither a number nor a string.
    pub fn from_value(value: &Value) -> Result<Self, ShapeError> {
        let Value::Object(map) = value else {
            return Err(ShapeError::InvalidEnum {
                member: "<root>".to_string(),
                reason: "enum definition must be an object".to_string(),
            });
        };

        let mut def = Self::default();
        for (name, member) in map {
            let member_value = match member {
                Value::String(s) => EnumValue::String(s.clone()),
                Value::Number(n) => EnumValue::Number(n.clone()),
                other => {
                    return Err(ShapeError::InvalidEnum {
                        member: name.clone(),
                        reason: format!("expected number or string, found {other}"),
                    })
                }
            };
            def.insert(name.clone(), member_value);
        }
        Ok(def)
    }

    /// Forward lookup: member name to value.
    pub fn value_of(&self, name: &str) -> Option<&EnumValue> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Reverse lookup: the name of the member whose value is `value`.
    pub fn name_of(&self, value: &Value) -> Option<&str> {
        self.members
            .iter()
            .find(|(_, v)| v.matches(value))
            .map(|(n, _)| n.as_str())
    }

    /// Membership test over declared values.
    pub fn contains(&self, value: &Value) -> bool {
        self.members.iter().any(|(_, v)| v.matches(value))
    }

    /// Iterate members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &EnumValue)> {
        self.members.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the enum declares no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Membership test used by the validators. Absent values are never members.
pub fn is_enum_member(value: Option<&Value>, definition: &EnumDefinition) -> bool {
    value.is_some_and(|v| definition.contains(v))
}

type PredicateFn = dyn Fn(Option<&Value>) -> bool + Send + Sync;

/// A caller-supplied boolean test over the raw value.
///
/// The predicate receives exactly what the validator was given: `None` for
/// an absent field, `Some(value)` otherwise.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Evaluate the predicate.
    pub fn test(&self, value: Option<&Value>) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(<fn>)")
    }
}

/// The companion check carried alongside a descriptor.
#[derive(Debug, Clone, Default)]
pub enum Check {
    /// Plain descriptor comparison.
    #[default]
    None,
    /// Closed enumeration membership.
    Enum(EnumDefinition),
    /// Opaque caller predicate.
    Predicate(Predicate),
}

impl Check {
    /// Shorthand for [`Check::Predicate`].
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(f))
    }

    /// True for [`Check::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<EnumDefinition> for Check {
    fn from(def: EnumDefinition) -> Self {
        Self::Enum(def)
    }
}

impl From<Predicate> for Check {
    fn from(p: Predicate) -> Self {
        Self::Predicate(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status() -> EnumDefinition {
        EnumDefinition::new([("Active", 1), ("Suspended", 2)])
    }

    #[test]
    fn numeric_members_match_by_value() {
        let def = status();
        assert!(def.contains(&json!(1)));
        assert!(def.contains(&json!(2.0)));
        assert!(!def.contains(&json!(3)));
    }

    #[test]
    fn large_integer_members_compare_exactly() {
        let def = EnumDefinition::new([("Big", 9_007_199_254_740_993i64)]);
        assert!(def.contains(&json!(9_007_199_254_740_993i64)));
        assert!(!def.contains(&json!(9_007_199_254_740_992i64)));

        let def = EnumDefinition::from_value(&json!({"Max": u64::MAX})).unwrap();
        assert!(def.contains(&json!(u64::MAX)));
        assert!(!def.contains(&json!(u64::MAX - 1)));
        assert!(!def.contains(&json!(-1)));
    }

    #[test]
    fn float_members_match_integral_values() {
        let def = EnumDefinition::from_value(&json!({"Half": 0.5, "One": 1.0})).unwrap();
        assert!(def.contains(&json!(0.5)));
        assert!(def.contains(&json!(1)));
        assert!(!def.contains(&json!(2)));
    }

    #[test]
    fn member_names_are_not_members() {
        let def = status();
        assert!(!def.contains(&json!("Active")));
    }

    #[test]
    fn lookup_like_keys_are_not_members() {
        let def = EnumDefinition::new([("Red", "red")]);
        for probe in ["constructor", "toString", "__proto__", "hasOwnProperty"] {
            assert!(!def.contains(&json!(probe)), "{probe} should not be a member");
        }
    }

    #[test]
    fn string_members_match_exactly() {
        let def = EnumDefinition::new([("Red", "red"), ("Blue", "blue")]);
        assert!(def.contains(&json!("red")));
        assert!(!def.contains(&json!("RED")));
        assert!(!def.contains(&json!(0)));
    }

    #[test]
    fn forward_and_reverse_lookup() {
        let def = status();
        assert_eq!(def.value_of("Suspended"), Some(&EnumValue::Number(Number::from(2))));
        assert_eq!(def.value_of("Missing"), None);
        assert_eq!(def.name_of(&json!(1)), Some("Active"));
    }

    #[test]
    fn repeated_name_keeps_position_and_takes_last_value() {
        let def = EnumDefinition::new([("A", 1), ("B", 2), ("A", 3)]);
        let names: Vec<&str> = def.members().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(def.value_of("A"), Some(&EnumValue::Number(Number::from(3))));
    }

    #[test]
    fn from_value_accepts_mixed_members() {
        let def = EnumDefinition::from_value(&json!({"A": 1, "B": "b"})).unwrap();
        assert_eq!(def.len(), 2);
        assert!(def.contains(&json!(1)));
        assert!(def.contains(&json!("b")));
    }

    #[test]
    fn from_value_rejects_non_primitive_members() {
        let err = EnumDefinition::from_value(&json!({"A": [1]})).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidEnum { ref member, .. } if member == "A"));
    }

    #[test]
    fn from_value_rejects_non_object() {
        assert!(EnumDefinition::from_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn absent_is_never_a_member() {
        assert!(!is_enum_member(None, &status()));
    }

    #[test]
    fn predicate_sees_absence() {
        let p = Predicate::new(|v| v.is_none());
        assert!(p.test(None));
        assert!(!p.test(Some(&Value::Null)));
    }
}
