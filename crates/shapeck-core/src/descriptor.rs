//! # Type Descriptor Grammar
//!
//! A type descriptor is a short string naming the expected shape of a value:
//!
//! ```text
//! descriptor := bare [ "?" ]
//! bare       := kind-name | container "<" element ">"
//! container  := "array" | "map" | "set"        (case-insensitive)
//! ```
//!
//! The trailing `?` marks the value as optional (absent or null). Container
//! detection is purely textual: a descriptor is a container iff it contains
//! `<`. The kind is everything before the first `<` and the element is
//! everything between that `<` and the first `>` after it. Text after the
//! closing `>` is ignored.
//!
//! Nested containers (`array<map<string>>`) are rejected rather than
//! mis-parsed.

use std::fmt;
use std::str::FromStr;

use crate::error::ShapeError;

/// Marker suffix for optional descriptors.
pub const OPTIONAL_SUFFIX: char = '?';

/// Result of scanning a descriptor for container syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSyntax<'a> {
    /// No `<` in the descriptor.
    Scalar,
    /// A `<` was found. Empty substrings are reported as `None`.
    Container {
        /// Text before the first `<`.
        kind: Option<&'a str>,
        /// Text between the first `<` and the first `>` after it.
        element: Option<&'a str>,
    },
}

/// Scan a bare descriptor for `Kind<Element>` syntax.
///
/// No validation is performed on the kind; unknown kinds are rejected by
/// the caller when it dispatches.
pub fn parse_container(descriptor: &str) -> ContainerSyntax<'_> {
    let Some(open) = descriptor.find('<') else {
        return ContainerSyntax::Scalar;
    };
    let kind = &descriptor[..open];
    let rest = &descriptor[open + 1..];
    let element = rest.find('>').map(|close| &rest[..close]);

    ContainerSyntax::Container {
        kind: non_empty(kind),
        element: element.and_then(non_empty),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// A container descriptor whose kind and element are both present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerDescriptor<'a> {
    /// Kind text exactly as written (not yet matched against [`ContainerKind`]).
    pub kind: &'a str,
    /// Element descriptor.
    pub element: &'a str,
}

/// Parse a bare descriptor and enforce that container syntax is complete.
///
/// Returns `Ok(None)` for scalar descriptors.
///
/// # Errors
///
/// - [`ShapeError::MalformedDescriptor`] if a `<` is present but the kind or
///   element is missing.
/// - [`ShapeError::NestedContainer`] if the element itself uses container
///   syntax.
pub fn resolve_container(descriptor: &str) -> Result<Option<ContainerDescriptor<'_>>, ShapeError> {
    match parse_container(descriptor) {
        ContainerSyntax::Scalar => Ok(None),
        ContainerSyntax::Container { kind: None, .. } => Err(ShapeError::MalformedDescriptor {
            descriptor: descriptor.to_string(),
            reason: "missing container kind",
        }),
        ContainerSyntax::Container { element: None, .. } => {
            Err(ShapeError::MalformedDescriptor {
                descriptor: descriptor.to_string(),
                reason: "missing element descriptor",
            })
        }
        ContainerSyntax::Container {
            kind: Some(kind),
            element: Some(element),
        } => {
            if element.contains('<') {
                return Err(ShapeError::NestedContainer {
                    descriptor: descriptor.to_string(),
                });
            }
            Ok(Some(ContainerDescriptor { kind, element }))
        }
    }
}

/// Strip a single trailing `?`.
///
/// Returns the bare descriptor and whether it was marked optional.
pub fn split_optional(descriptor: &str) -> (&str, bool) {
    match descriptor.strip_suffix(OPTIONAL_SUFFIX) {
        Some(bare) => (bare, true),
        None => (descriptor, false),
    }
}

/// The supported container kinds.
///
/// The kind only selects an entry point. Element checking is identical for
/// all three and iterates the value's own entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// `array<T>`
    Array,
    /// `map<T>`
    Map,
    /// `set<T>`
    Set,
}

impl ContainerKind {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Map => "map",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a container kind is not one of `array`, `map`, `set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedContainer(pub String);

impl fmt::Display for UnsupportedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported container type {}", self.0)
    }
}

impl std::error::Error for UnsupportedContainer {}

impl FromStr for ContainerKind {
    type Err = UnsupportedContainer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "array" => Ok(Self::Array),
            "map" => Ok(Self::Map),
            "set" => Ok(Self::Set),
            _ => Err(UnsupportedContainer(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_descriptor_has_no_container() {
        assert_eq!(parse_container("number"), ContainerSyntax::Scalar);
        assert_eq!(parse_container("custom"), ContainerSyntax::Scalar);
    }

    #[test]
    fn container_descriptor_splits_kind_and_element() {
        assert_eq!(
            parse_container("array<number>"),
            ContainerSyntax::Container {
                kind: Some("array"),
                element: Some("number"),
            }
        );
    }

    #[test]
    fn first_closing_bracket_wins() {
        assert_eq!(
            parse_container("map<string>boolean>"),
            ContainerSyntax::Container {
                kind: Some("map"),
                element: Some("string"),
            }
        );
    }

    #[test]
    fn missing_close_reports_no_element() {
        assert_eq!(
            parse_container("set<number"),
            ContainerSyntax::Container {
                kind: Some("set"),
                element: None,
            }
        );
    }

    #[test]
    fn closing_bracket_before_open_is_ignored() {
        assert_eq!(
            parse_container(">array<number"),
            ContainerSyntax::Container {
                kind: Some(">array"),
                element: None,
            }
        );
    }

    #[test]
    fn resolve_rejects_missing_kind() {
        let err = resolve_container("<number>").unwrap_err();
        assert!(matches!(err, ShapeError::MalformedDescriptor { reason: "missing container kind", .. }));
    }

    #[test]
    fn resolve_rejects_empty_element() {
        let err = resolve_container("array<>").unwrap_err();
        assert!(matches!(err, ShapeError::MalformedDescriptor { reason: "missing element descriptor", .. }));
    }

    #[test]
    fn resolve_rejects_nested_containers() {
        let err = resolve_container("array<map<string>>").unwrap_err();
        assert!(matches!(err, ShapeError::NestedContainer { .. }));
    }

    #[test]
    fn resolve_accepts_text_after_closing_bracket() {
        assert_eq!(
            resolve_container("map<string>>").unwrap(),
            Some(ContainerDescriptor {
                kind: "map",
                element: "string",
            })
        );
    }

    #[test]
    fn resolve_scalar_is_none() {
        assert_eq!(resolve_container("boolean").unwrap(), None);
    }

    #[test]
    fn split_optional_strips_one_marker() {
        assert_eq!(split_optional("number?"), ("number", true));
        assert_eq!(split_optional("number"), ("number", false));
        assert_eq!(split_optional("array<string>?"), ("array<string>", true));
        assert_eq!(split_optional("x??"), ("x?", true));
    }

    #[test]
    fn container_kind_is_case_insensitive() {
        assert_eq!("Array".parse::<ContainerKind>().unwrap(), ContainerKind::Array);
        assert_eq!("MAP".parse::<ContainerKind>().unwrap(), ContainerKind::Map);
        assert_eq!("set".parse::<ContainerKind>().unwrap(), ContainerKind::Set);
    }

    #[test]
    fn unknown_container_kind_message() {
        let err = "list".parse::<ContainerKind>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported container type list");
    }
}
