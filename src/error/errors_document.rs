//! The failure side of every conversion: a non-empty, ordered list of errors.

use std::fmt::{self, Display};

use serde_json::{Map, Value};
use stillwater::prelude::*;

use crate::convert::{decode_array, FromJson, Members, ToJson};
use crate::error::{EncodeError, ValidationError};
use crate::template::ErrorTemplate;
use crate::ValidationResult;

/// A JSON:API errors document: `{"errors": [...]}`.
///
/// `ErrorsDocument` wraps a `NonEmptyVec<ValidationError>` so a failed
/// conversion always carries at least one error. Errors stay in the order
/// their locations appear in the input; [`merge`](ErrorsDocument::merge)
/// places the incoming errors after the ones already gathered.
///
/// # Example
///
/// ```rust
/// use jsonapi_validate::{ErrorTemplate, ErrorsDocument, ValidationError};
///
/// let root = ErrorTemplate::default();
/// let first = ErrorsDocument::single(ValidationError::missing(&root, "data"));
/// let meta = root.descend("meta");
/// let second = ErrorsDocument::single(ValidationError::type_mismatch(&meta, "object"));
///
/// let merged = first.merge(second);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged.first().title.as_deref(), Some("Child missing"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorsDocument(NonEmptyVec<ValidationError>);

impl ErrorsDocument {
    /// Creates a document holding a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a document from a list of errors, or `None` if the list is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Combines two documents, keeping `self`'s errors ahead of `incoming`'s.
    ///
    /// Merging appends. `a.merge(b).merge(c)` lists `a`'s errors, then `b`'s,
    /// then `c`'s, so a finished reduction is already in document order and
    /// is never reversed afterwards. Append is associative, so grouping
    /// sibling results differently (as the parallel array decoder does)
    /// yields the same order.
    pub fn merge(self, incoming: Self) -> Self {
        Self(self.0.combine(incoming.0))
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a document holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors in document order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns the first error.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Returns all errors whose source is the given pointer.
    pub fn at_pointer(&self, pointer: &str) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| e.source.pointer() == Some(pointer))
            .collect()
    }

    /// Returns all errors with the given title.
    pub fn with_title(&self, title: &str) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| e.title.as_deref() == Some(title))
            .collect()
    }

    /// Converts this document into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl From<ValidationError> for ErrorsDocument {
    fn from(error: ValidationError) -> Self {
        Self::single(error)
    }
}

impl Semigroup for ErrorsDocument {
    fn combine(self, other: Self) -> Self {
        self.merge(other)
    }
}

impl Display for ErrorsDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Document invalid with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorsDocument {}

impl IntoIterator for ErrorsDocument {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl FromJson for ErrorsDocument {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        let members = match Members::of(raw, template, "errors document") {
            Validation::Success(m) => m,
            Validation::Failure(e) => return Validation::Failure(e),
        };
        let Some(errors) = members.get("errors") else {
            return Validation::Failure(ValidationError::missing(template, "errors").into());
        };

        let errors_template = template.descend("errors");
        let decoded = match errors.as_array() {
            Some(items) => decode_array::<ValidationError>(items, &errors_template),
            None => Validation::Failure(
                ValidationError::type_mismatch(&errors_template, "non-empty array").into(),
            ),
        };
        let result = match decoded {
            Validation::Success(errors) => match ErrorsDocument::from_vec(errors) {
                Some(document) => Validation::Success(document),
                None => Validation::Failure(
                    ValidationError::type_mismatch(&errors_template, "non-empty array").into(),
                ),
            },
            Validation::Failure(e) => Validation::Failure(e),
        };

        tracing::debug!(
            pointer = template.pointer(),
            valid = result.is_success(),
            "parsed errors document"
        );
        result
    }
}

impl ToJson for ErrorsDocument {
    fn to_json(&self) -> Result<Value, EncodeError> {
        let errors = self
            .iter()
            .map(ToJson::to_json)
            .collect::<Result<Vec<_>, _>>()?;
        let mut object = Map::new();
        object.insert("errors".to_string(), Value::Array(errors));
        Ok(Value::Object(object))
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorsDocument>();
    assert_sync::<ErrorsDocument>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(pointer: &str) -> ValidationError {
        ValidationError::type_mismatch(
            &ErrorTemplate::default().with_source(crate::ErrorSource::pointer_at(pointer)),
            "string",
        )
    }

    #[test]
    fn test_single() {
        let document = ErrorsDocument::single(at("/a"));
        assert_eq!(document.len(), 1);
        assert!(!document.is_empty());
        assert_eq!(document.first().source.pointer(), Some("/a"));
    }

    #[test]
    fn test_from_vec() {
        assert!(ErrorsDocument::from_vec(vec![]).is_none());
        let document = ErrorsDocument::from_vec(vec![at("/a"), at("/b"), at("/c")]).unwrap();
        let pointers: Vec<_> = document.iter().filter_map(|e| e.source.pointer()).collect();
        assert_eq!(pointers, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_merge_preserves_order_of_nested_chunks() {
        let left = ErrorsDocument::from_vec(vec![at("/a/0"), at("/a/1")]).unwrap();
        let right = ErrorsDocument::from_vec(vec![at("/b/0"), at("/b/1")]).unwrap();
        let merged = left.merge(right);

        let pointers: Vec<_> = merged.iter().filter_map(|e| e.source.pointer()).collect();
        assert_eq!(pointers, vec!["/a/0", "/a/1", "/b/0", "/b/1"]);
    }

    #[test]
    fn test_merge_is_associative() {
        let e1 = ErrorsDocument::single(at("/1"));
        let e2 = ErrorsDocument::single(at("/2"));
        let e3 = ErrorsDocument::single(at("/3"));

        let left = e1.clone().merge(e2.clone()).merge(e3.clone());
        let right = e1.merge(e2.merge(e3));
        assert_eq!(left, right);
    }

    #[test]
    fn test_at_pointer_and_with_title() {
        let document = ErrorsDocument::from_vec(vec![
            at("/a"),
            ValidationError::missing(&ErrorTemplate::default(), "data"),
            at("/a"),
        ])
        .unwrap();

        assert_eq!(document.at_pointer("/a").len(), 2);
        assert_eq!(document.with_title("Child missing").len(), 1);
        assert_eq!(document.with_title("Type is wrong").len(), 2);
    }

    #[test]
    fn test_display() {
        let document = ErrorsDocument::from_vec(vec![at("/a"), at("/b")]).unwrap();
        let display = document.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. /a: Type is wrong"));
    }

    #[test]
    fn test_from_json_requires_errors_member() {
        let errors = ErrorsDocument::from_json(&json!({}), &ErrorTemplate::default())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().title.as_deref(), Some("Child missing"));
    }

    #[test]
    fn test_from_json_rejects_empty_errors() {
        let errors = ErrorsDocument::from_json(&json!({"errors": []}), &ErrorTemplate::default())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().source.pointer(), Some("/errors"));
        assert_eq!(errors.first().title.as_deref(), Some("Type is wrong"));
    }

    #[test]
    fn test_to_json_shape() {
        let document = ErrorsDocument::single(ValidationError::unknown_relationship_path("x"));
        let value = document.to_json().unwrap();
        assert_eq!(value["errors"][0]["source"], json!({"parameter": "include"}));
        assert_eq!(value["errors"][0]["status"], json!("422"));
    }
}
