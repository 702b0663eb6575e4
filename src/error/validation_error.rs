//! A single reportable problem with a JSON:API document.

use std::fmt::{self, Display};

use serde_json::{json, Map, Value};
use stillwater::Validation;

use crate::convert::{FromJson, Members, Reduction, ToJson};
use crate::document::{Links, Meta};
use crate::error::EncodeError;
use crate::source::ErrorSource;
use crate::template::ErrorTemplate;
use crate::ValidationResult;

/// Status code attached to every violation found while parsing input.
const UNPROCESSABLE_ENTITY: &str = "422";

/// A JSON:API error object.
///
/// Parsing fills these from the factories below (`missing`, `type_mismatch`,
/// `conflicting`, `minimum_children`, `unknown_relationship_path`), which
/// derive `title`, `detail`, `meta` and `status` from the kind of violation
/// and its location. Callers that need kind-specific handling match on
/// `title` or on the keys of `meta`.
///
/// # Example
///
/// ```rust
/// use jsonapi_validate::{ErrorTemplate, ValidationError};
///
/// let template = ErrorTemplate::default().descend("data");
/// let error = ValidationError::missing(&template, "type");
///
/// assert_eq!(error.title.as_deref(), Some("Child missing"));
/// assert_eq!(error.detail.as_deref(), Some("`/data/type` is missing"));
/// assert_eq!(error.source.pointer(), Some("/data"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationError {
    /// Application-specific error code.
    pub code: Option<String>,
    /// Human-readable explanation specific to this occurrence.
    pub detail: Option<String>,
    /// Unique identifier for this occurrence.
    pub id: Option<String>,
    /// Links, typically `about`.
    pub links: Option<Links>,
    /// Non-standard meta-information.
    pub meta: Option<Meta>,
    /// Where the problem was found.
    pub source: ErrorSource,
    /// HTTP status code, as a string.
    pub status: Option<String>,
    /// Short summary of the kind of problem.
    pub title: Option<String>,
}

impl ValidationError {
    /// Creates an error with the given title at `source`.
    pub fn new(source: ErrorSource, title: impl Into<String>) -> Self {
        Self {
            source,
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the detail and returns self for chaining.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the application code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the id and returns self for chaining.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the status and returns self for chaining.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the links and returns self for chaining.
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }

    /// Sets the meta and returns self for chaining.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// A required member `child` is absent from the object at the template's location.
    pub fn missing(template: &ErrorTemplate, child: &str) -> Self {
        let child_pointer = template.descend(child);
        Self::violation(
            template,
            "Child missing",
            format!("`{}` is missing", child_pointer.pointer()),
            json!({ "child": child }),
        )
    }

    /// The value at the template's location has the wrong JSON shape.
    ///
    /// `human_type` names what was expected, e.g. `"string"` or `"resource linkage"`.
    pub fn type_mismatch(template: &ErrorTemplate, human_type: &str) -> Self {
        Self::violation(
            template,
            "Type is wrong",
            format!("`{}` type is not `{}`", template.pointer(), human_type),
            json!({ "type": human_type }),
        )
    }

    /// Mutually exclusive members are present together.
    pub fn conflicting(template: &ErrorTemplate, children: &[&str]) -> Self {
        Self::violation(
            template,
            "Children conflicting",
            format!(
                "`{}` can have at most one of {}",
                template.pointer(),
                quoted_list(children)
            ),
            json!({ "children": children }),
        )
    }

    /// None of an "at least one of" set of members is present.
    pub fn minimum_children(template: &ErrorTemplate, children: &[&str]) -> Self {
        Self::violation(
            template,
            "Not enough children",
            format!(
                "`{}` must have at least one of {}",
                template.pointer(),
                quoted_list(children)
            ),
            json!({ "children": children }),
        )
    }

    /// An `include` path that names no known relationship chain.
    pub fn unknown_relationship_path(path: &str) -> Self {
        let mut meta = Map::new();
        meta.insert(
            "relationship_path".to_string(),
            Value::String(path.to_string()),
        );
        ValidationError::new(ErrorSource::parameter("include"), "Unknown relationship path")
            .with_detail(format!("`{}` is an unknown relationship path", path))
            .with_meta(meta)
            .with_status(UNPROCESSABLE_ENTITY)
    }

    fn violation(template: &ErrorTemplate, title: &str, detail: String, meta: Value) -> Self {
        let mut error = ValidationError::new(template.source().clone(), title)
            .with_detail(detail)
            .with_status(UNPROCESSABLE_ENTITY);
        if let Value::Object(meta) = meta {
            error.meta = Some(meta);
        }
        error
    }
}

fn quoted_list(children: &[&str]) -> String {
    children
        .iter()
        .map(|c| format!("`{}`", c))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.source)?;
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => write!(f, "{} ({})", title, detail),
            (Some(text), None) | (None, Some(text)) => write!(f, "{}", text),
            (None, None) => write!(f, "unspecified error"),
        }
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

impl FromJson for ValidationError {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        let members = match Members::of(raw, template, "error") {
            Validation::Success(m) => m,
            Validation::Failure(e) => return Validation::Failure(e),
        };

        Reduction::new(ValidationError::default())
            .merge(members.optional::<String>("code"), |e, v| e.code = Some(v))
            .merge(members.optional::<String>("detail"), |e, v| e.detail = Some(v))
            .merge(members.optional::<String>("id"), |e, v| e.id = Some(v))
            .merge(members.optional::<Links>("links"), |e, v| e.links = Some(v))
            .merge(members.optional::<Meta>("meta"), |e, v| e.meta = Some(v))
            .merge(members.optional::<ErrorSource>("source"), |e, v| e.source = v)
            .merge(members.optional::<String>("status"), |e, v| e.status = Some(v))
            .merge(members.optional::<String>("title"), |e, v| e.title = Some(v))
            .finish()
    }
}

impl ToJson for ValidationError {
    fn to_json(&self) -> Result<Value, EncodeError> {
        let mut object = Map::new();
        let strings = [
            ("code", &self.code),
            ("detail", &self.detail),
            ("id", &self.id),
        ];
        for (name, value) in strings {
            if let Some(value) = value {
                object.insert(name.to_string(), Value::String(value.clone()));
            }
        }
        if let Some(links) = &self.links {
            object.insert("links".to_string(), links.to_json()?);
        }
        if let Some(meta) = &self.meta {
            object.insert("meta".to_string(), Value::Object(meta.clone()));
        }
        if !self.source.is_unknown() {
            object.insert("source".to_string(), self.source.to_json()?);
        }
        if let Some(status) = &self.status {
            object.insert("status".to_string(), Value::String(status.clone()));
        }
        if let Some(title) = &self.title {
            object.insert("title".to_string(), Value::String(title.clone()));
        }
        Ok(Value::Object(object))
    }
}
