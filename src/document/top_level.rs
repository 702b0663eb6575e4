//! The top-level JSON:API document.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::convert::{FromJson, Members, Reduction, ToJson};
use crate::error::{EncodeError, ErrorsDocument, ValidationError};
use crate::template::{Action, ErrorTemplate, Sender};
use crate::ValidationResult;

use super::{JsonApi, Links, Meta, Resource, ResourceLinkage};

const TOP_LEVEL: [&str; 3] = ["data", "errors", "meta"];
const EXCLUSIVE: [&str; 2] = ["data", "errors"];

/// A JSON:API document.
///
/// A document has at least one of `data`, `errors` and `meta`, and never
/// both `data` and `errors`. `data: None` means the member is absent;
/// `Some(ResourceLinkage::Empty)` is an explicit `null`.
///
/// # Example
///
/// ```rust
/// use jsonapi_validate::{Action, Document, ResourceLinkage, Sender};
/// use serde_json::json;
///
/// let document = Document::parse(&json!({"data": null}), Action::Fetch, Sender::Server)
///     .into_result()
///     .unwrap();
/// assert_eq!(document.data, Some(ResourceLinkage::Empty));
///
/// let errors = Document::parse(&json!({}), Action::Fetch, Sender::Server)
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.first().title.as_deref(), Some("Not enough children"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub data: Option<ResourceLinkage>,
    pub errors: Option<Vec<ValidationError>>,
    pub included: Option<Vec<Resource>>,
    pub jsonapi: Option<JsonApi>,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}

impl Document {
    /// A document whose primary data is `data`.
    pub fn with_data(data: ResourceLinkage) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// A meta-only document.
    pub fn with_meta(meta: Meta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::default()
        }
    }

    /// Decodes a top-level document sent for `action` by `sender`.
    pub fn parse(raw: &Value, action: Action, sender: Sender) -> ValidationResult<Self> {
        let template = ErrorTemplate::new(action, sender);
        let result = Self::from_json(raw, &template);
        match &result {
            Validation::Success(_) => {
                tracing::debug!(%action, %sender, "parsed valid document");
            }
            Validation::Failure(errors) => {
                tracing::debug!(%action, %sender, errors = errors.len(), "document is invalid");
            }
        }
        result
    }

    /// Encodes the document, refusing one that carries both `data` and errors.
    pub fn encode(&self) -> Result<Value, EncodeError> {
        self.to_json()
    }

    /// Looks up included resources by `(type, id)`.
    ///
    /// Resources without an id are skipped.
    pub fn included_index(&self) -> IndexMap<(&str, &str), &Resource> {
        self.included
            .iter()
            .flatten()
            .filter_map(|resource| {
                resource
                    .id
                    .as_deref()
                    .map(|id| ((resource.kind.as_str(), id), resource))
            })
            .collect()
    }
}

impl From<ErrorsDocument> for Document {
    fn from(errors: ErrorsDocument) -> Self {
        Self {
            errors: Some(errors.into_vec()),
            ..Self::default()
        }
    }
}

impl FromJson for Document {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        let members = match Members::of(raw, template, "document") {
            Validation::Success(m) => m,
            Validation::Failure(e) => return Validation::Failure(e),
        };

        let mut reduction = Reduction::new(Document::default())
            .merge(members.optional::<ResourceLinkage>("data"), |d, data| d.data = Some(data))
            .merge(members.optional::<Vec<ValidationError>>("errors"), |d, e| d.errors = Some(e))
            .merge(members.optional::<Vec<Resource>>("included"), |d, i| d.included = Some(i))
            .merge(members.optional::<JsonApi>("jsonapi"), |d, j| d.jsonapi = Some(j))
            .merge(members.optional::<Links>("links"), |d, l| d.links = Some(l))
            .merge(members.optional::<Meta>("meta"), |d, m| d.meta = Some(m));

        if members.present(&TOP_LEVEL).is_empty() {
            reduction = reduction.reject(ValidationError::minimum_children(template, &TOP_LEVEL));
        }
        if has_data_and_errors(&members) {
            reduction = reduction.reject(ValidationError::conflicting(template, &EXCLUSIVE));
        }

        reduction.finish()
    }
}

/// `data` next to a non-empty `errors` array: the same pair `to_json` refuses.
///
/// An empty `errors` list carries no errors, so it may sit beside `data`.
fn has_data_and_errors(members: &Members<'_>) -> bool {
    let errors = members
        .get("errors")
        .and_then(Value::as_array)
        .is_some_and(|errors| !errors.is_empty());
    members.has("data") && errors
}

impl ToJson for Document {
    fn to_json(&self) -> Result<Value, EncodeError> {
        if let (Some(_), Some(errors)) = (&self.data, &self.errors) {
            if !errors.is_empty() {
                return Err(EncodeError::ConflictingDataAndErrors(errors.len()));
            }
        }

        let mut object = Map::new();
        if let Some(data) = &self.data {
            object.insert("data".to_string(), data.to_json()?);
        }
        if let Some(errors) = &self.errors {
            object.insert("errors".to_string(), errors.to_json()?);
        }
        if let Some(included) = &self.included {
            object.insert("included".to_string(), included.to_json()?);
        }
        if let Some(jsonapi) = &self.jsonapi {
            object.insert("jsonapi".to_string(), jsonapi.to_json()?);
        }
        if let Some(links) = &self.links {
            object.insert("links".to_string(), links.to_json()?);
        }
        if let Some(meta) = &self.meta {
            object.insert("meta".to_string(), Value::Object(meta.clone()));
        }
        Ok(Value::Object(object))
    }
}
