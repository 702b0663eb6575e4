//! Resource objects.

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::convert::{FromJson, Members, Reduction, ToJson};
use crate::error::EncodeError;
use crate::template::ErrorTemplate;
use crate::ValidationResult;

use super::{Attributes, Links, Meta, Relationships};

/// A JSON:API resource object.
///
/// `id` may be omitted only in a document a client sends to create the
/// resource; everywhere else it is required.
///
/// # Example
///
/// ```rust
/// use jsonapi_validate::convert::FromJson;
/// use jsonapi_validate::{Action, ErrorTemplate, Resource, Sender};
/// use serde_json::json;
///
/// let raw = json!({"type": "post", "attributes": {"title": "Hello"}});
///
/// let create = ErrorTemplate::new(Action::Create, Sender::Client);
/// assert!(Resource::from_json(&raw, &create).is_success());
///
/// let update = ErrorTemplate::new(Action::Update, Sender::Client);
/// assert!(Resource::from_json(&raw, &update).is_failure());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    pub id: Option<String>,
    /// The `type` member.
    pub kind: String,
    pub attributes: Option<Attributes>,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
    pub relationships: Option<Relationships>,
}

impl Resource {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Sets the id and returns self for chaining.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the attributes and returns self for chaining.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Sets the relationships and returns self for chaining.
    pub fn with_relationships(mut self, relationships: Relationships) -> Self {
        self.relationships = Some(relationships);
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
}

impl FromJson for Resource {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        let members = match Members::of(raw, template, "resource") {
            Validation::Success(m) => m,
            Validation::Failure(e) => return Validation::Failure(e),
        };

        Reduction::new(Resource::default())
            .merge(
                members.required_if::<String>("id", template.requires_resource_id()),
                |r, id| r.id = Some(id),
            )
            .merge(members.required::<String>("type"), |r, kind| r.kind = kind)
            .merge(members.optional::<Attributes>("attributes"), |r, a| r.attributes = Some(a))
            .merge(members.optional::<Links>("links"), |r, l| r.links = Some(l))
            .merge(members.optional::<Meta>("meta"), |r, m| r.meta = Some(m))
            .merge(members.optional::<Relationships>("relationships"), |r, rel| {
                r.relationships = Some(rel)
            })
            .finish()
    }
}

impl ToJson for Resource {
    fn to_json(&self) -> Result<Value, EncodeError> {
        let mut object = Map::new();
        if let Some(id) = &self.id {
            object.insert("id".to_string(), Value::String(id.clone()));
        }
        object.insert("type".to_string(), Value::String(self.kind.clone()));
        if let Some(attributes) = &self.attributes {
            object.insert("attributes".to_string(), Value::Object(attributes.clone()));
        }
        if let Some(links) = &self.links {
            object.insert("links".to_string(), links.to_json()?);
        }
        if let Some(meta) = &self.meta {
            object.insert("meta".to_string(), Value::Object(meta.clone()));
        }
        if let Some(relationships) = &self.relationships {
            object.insert("relationships".to_string(), relationships.to_json()?);
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Action, Sender};
    use serde_json::json;

    #[test]
    fn test_full_resource() {
        let resource = Resource::from_json(
            &json!({
                "type": "articles",
                "id": "1",
                "attributes": {"title": "Rails is Omakase"},
                "links": {"self": "http://example.com/articles/1"},
                "meta": {"views": 3},
                "relationships": {
                    "author": {"data": {"type": "people", "id": "9"}}
                }
            }),
            &ErrorTemplate::default(),
        )
        .into_result()
        .unwrap();

        assert_eq!(resource.kind, "articles");
        assert_eq!(resource.id.as_deref(), Some("1"));
        assert_eq!(
            resource.attributes.unwrap().get("title"),
            Some(&json!("Rails is Omakase"))
        );
        assert!(resource.relationships.unwrap().contains_key("author"));
    }

    #[test]
    fn test_id_optional_for_client_create() {
        let template = ErrorTemplate::new(Action::Create, Sender::Client);
        let resource = Resource::from_json(&json!({"type": "thing"}), &template)
            .into_result()
            .unwrap();
        assert_eq!(resource, Resource::new("thing"));
    }

    #[test]
    fn test_id_required_for_server_create() {
        let template = ErrorTemplate::new(Action::Create, Sender::Server).descend("data");
        let errors = Resource::from_json(&json!({"type": "thing"}), &template)
            .into_result()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().detail.as_deref(), Some("`/data/id` is missing"));
    }

    #[test]
    fn test_all_member_errors_reported() {
        let template = ErrorTemplate::default().descend("data");
        let errors = Resource::from_json(
            &json!({"id": 1, "attributes": [], "meta": "m"}),
            &template,
        )
        .into_result()
        .unwrap_err();

        let summary: Vec<_> = errors
            .iter()
            .map(|e| (e.source.pointer().unwrap_or(""), e.title.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("/data/id", "Type is wrong"),
                ("/data", "Child missing"),
                ("/data/attributes", "Type is wrong"),
                ("/data/meta", "Type is wrong"),
            ]
        );
    }

    #[test]
    fn test_to_json_omits_unset_members() {
        let value = Resource::new("thing").to_json().unwrap();
        assert_eq!(value, json!({"type": "thing"}));
    }
}
