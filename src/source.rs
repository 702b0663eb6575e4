//! Error locations: where in a request a problem was found.
//!
//! This module provides [`ErrorSource`], which names either a query parameter
//! or a JSON Pointer (RFC 6901) into the request document, and [`Segment`],
//! the unit a pointer grows by when conversion descends into a member or an
//! array element.

use std::fmt::{self, Display};

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::convert::{FromJson, Members, Reduction, ToJson};
use crate::error::{EncodeError, ValidationError};
use crate::template::ErrorTemplate;
use crate::ValidationResult;

/// A step taken while descending into a JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An object member (e.g. `data`, `attributes`)
    Member(String),
    /// An array element (e.g. `0`, `42`)
    Index(usize),
}

impl Segment {
    /// Creates a new member segment.
    pub fn member(name: impl Into<String>) -> Self {
        Segment::Member(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Member(name.to_string())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Segment::Member(name)
    }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Member(name) => {
                for c in name.chars() {
                    match c {
                        '~' => write!(f, "~0")?,
                        '/' => write!(f, "~1")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                Ok(())
            }
            Segment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// The `source` member of a JSON:API error object.
///
/// At most one of `parameter` and `pointer` is set. The root of a document is
/// the empty pointer `""`, and every descent appends `/` plus the escaped
/// segment.
///
/// # Example
///
/// ```rust
/// use jsonapi_validate::ErrorSource;
///
/// let source = ErrorSource::root()
///     .descend("data")
///     .descend("relationships")
///     .descend(0);
///
/// assert_eq!(source.pointer(), Some("/data/relationships/0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ErrorSource {
    parameter: Option<String>,
    pointer: Option<String>,
}

impl ErrorSource {
    /// The pointer to the whole document (`""`).
    pub fn root() -> Self {
        Self::pointer_at("")
    }

    /// A source naming a JSON Pointer.
    pub fn pointer_at(pointer: impl Into<String>) -> Self {
        Self {
            parameter: None,
            pointer: Some(pointer.into()),
        }
    }

    /// A source naming a query parameter.
    pub fn parameter(name: impl Into<String>) -> Self {
        Self {
            parameter: Some(name.into()),
            pointer: None,
        }
    }

    /// A source with neither a parameter nor a pointer.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Returns a new source whose pointer has `segment` appended.
    ///
    /// Only meaningful for pointer sources: conversion never descends from a
    /// parameter source, and doing so returns the source unchanged.
    pub fn descend(&self, segment: impl Into<Segment>) -> Self {
        match &self.pointer {
            Some(pointer) => Self::pointer_at(format!("{}/{}", pointer, segment.into())),
            None => self.clone(),
        }
    }

    /// The JSON Pointer, if this source names one.
    pub fn pointer(&self) -> Option<&str> {
        self.pointer.as_deref()
    }

    /// The query parameter name, if this source names one.
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Returns true if this source names neither a parameter nor a pointer.
    pub fn is_unknown(&self) -> bool {
        self.parameter.is_none() && self.pointer.is_none()
    }
}

impl Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.pointer, &self.parameter) {
            (Some(pointer), _) if pointer.is_empty() => write!(f, "(root)"),
            (Some(pointer), _) => write!(f, "{}", pointer),
            (None, Some(parameter)) => write!(f, "?{}", parameter),
            (None, None) => write!(f, "(unknown)"),
        }
    }
}

impl FromJson for ErrorSource {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        let members = match Members::of(raw, template, "source") {
            Validation::Success(m) => m,
            Validation::Failure(e) => return Validation::Failure(e),
        };

        if members.has("parameter") && members.has("pointer") {
            return Validation::Failure(
                ValidationError::conflicting(template, &["parameter", "pointer"]).into(),
            );
        }

        Reduction::new(ErrorSource::unknown())
            .merge(members.optional::<String>("parameter"), |s, p| s.parameter = Some(p))
            .merge(members.optional::<String>("pointer"), |s, p| s.pointer = Some(p))
            .finish()
    }
}

impl ToJson for ErrorSource {
    fn to_json(&self) -> Result<Value, EncodeError> {
        let mut object = Map::new();
        if let Some(parameter) = &self.parameter {
            object.insert("parameter".to_string(), Value::String(parameter.clone()));
        }
        if let Some(pointer) = &self.pointer {
            object.insert("pointer".to_string(), Value::String(pointer.clone()));
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_pointer_is_empty() {
        let source = ErrorSource::root();
        assert_eq!(source.pointer(), Some(""));
        assert_eq!(source.parameter_name(), None);
        assert_eq!(source.to_string(), "(root)");
    }

    #[test]
    fn test_descend_member() {
        let source = ErrorSource::root().descend("data");
        assert_eq!(source.pointer(), Some("/data"));
    }

    #[test]
    fn test_descend_index() {
        let source = ErrorSource::root().descend("included").descend(3);
        assert_eq!(source.pointer(), Some("/included/3"));
    }

    #[test]
    fn test_descend_escapes_reserved_characters() {
        let source = ErrorSource::root().descend("a/b").descend("c~d");
        assert_eq!(source.pointer(), Some("/a~1b/c~0d"));
    }

    #[test]
    fn test_descend_is_immutable() {
        let base = ErrorSource::root().descend("errors");
        let first = base.descend(0);
        let second = base.descend(1);

        assert_eq!(base.pointer(), Some("/errors"));
        assert_eq!(first.pointer(), Some("/errors/0"));
        assert_eq!(second.pointer(), Some("/errors/1"));
    }

    #[test]
    fn test_parameter_source_does_not_descend() {
        let source = ErrorSource::parameter("include");
        assert_eq!(source.descend("x"), source);
        assert_eq!(source.to_string(), "?include");
    }

    #[test]
    fn test_from_json_pointer() {
        let template = ErrorTemplate::default();
        let result = ErrorSource::from_json(&json!({"pointer": "/data"}), &template);
        assert_eq!(
            result.into_result().unwrap(),
            ErrorSource::pointer_at("/data")
        );
    }

    #[test]
    fn test_from_json_empty_object() {
        let result = ErrorSource::from_json(&json!({}), &ErrorTemplate::default());
        assert!(result.into_result().unwrap().is_unknown());
    }

    #[test]
    fn test_from_json_conflicting_members() {
        let result = ErrorSource::from_json(
            &json!({"parameter": "q", "pointer": "/data"}),
            &ErrorTemplate::default(),
        );
        let errors = result.into_result().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().title.as_deref(), Some("Children conflicting"));
        assert_eq!(
            errors.first().meta.as_ref().and_then(|m| m.get("children")),
            Some(&json!(["parameter", "pointer"]))
        );
    }

    #[test]
    fn test_to_json_omits_absent_members() {
        let value = ErrorSource::parameter("include").to_json().unwrap();
        assert_eq!(value, json!({"parameter": "include"}));
    }
}
