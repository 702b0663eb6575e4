//! Resource identifier objects.

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::convert::{FromJson, Members, Reduction, ToJson};
use crate::error::EncodeError;
use crate::template::ErrorTemplate;
use crate::ValidationResult;

use super::Meta;

/// A `{type, id}` reference to a resource, without its attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceIdentifier {
    pub id: String,
    /// The `type` member.
    pub kind: String,
    pub meta: Option<Meta>,
}

impl ResourceIdentifier {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            meta: None,
        }
    }

    /// Sets the meta and returns self for chaining.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl FromJson for ResourceIdentifier {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        let members = match Members::of(raw, template, "resource identifier") {
            Validation::Success(m) => m,
            Validation::Failure(e) => return Validation::Failure(e),
        };

        Reduction::new(ResourceIdentifier::default())
            .merge(members.required::<String>("id"), |r, id| r.id = id)
            .merge(members.required::<String>("type"), |r, kind| r.kind = kind)
            .merge(members.optional::<Meta>("meta"), |r, meta| r.meta = Some(meta))
            .finish()
    }
}

impl ToJson for ResourceIdentifier {
    fn to_json(&self) -> Result<Value, EncodeError> {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        object.insert("type".to_string(), Value::String(self.kind.clone()));
        if let Some(meta) = &self.meta {
            object.insert("meta".to_string(), Value::Object(meta.clone()));
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_identifier() {
        let identifier = ResourceIdentifier::from_json(
            &json!({"type": "author", "id": "9", "meta": {"primary": true}}),
            &ErrorTemplate::default(),
        )
        .into_result()
        .unwrap();

        assert_eq!(identifier.kind, "author");
        assert_eq!(identifier.id, "9");
        assert!(identifier.meta.is_some());
    }

    #[test]
    fn test_missing_id_and_type_both_reported() {
        let template = ErrorTemplate::default().descend("data");
        let errors = ResourceIdentifier::from_json(&json!({}), &template)
            .into_result()
            .unwrap_err();

        let children: Vec<_> = errors
            .iter()
            .filter_map(|e| e.meta.as_ref().and_then(|m| m.get("child")))
            .collect();
        assert_eq!(children, vec![&json!("id"), &json!("type")]);
        assert!(errors.iter().all(|e| e.source.pointer() == Some("/data")));
    }

    #[test]
    fn test_non_object() {
        let errors = ResourceIdentifier::from_json(&json!(7), &ErrorTemplate::default())
            .into_result()
            .unwrap_err();
        assert_eq!(
            errors.first().meta.as_ref().and_then(|m| m.get("type")),
            Some(&json!("resource identifier"))
        );
    }

    #[test]
    fn test_to_json() {
        let value = ResourceIdentifier::new("author", "9").to_json().unwrap();
        assert_eq!(value, json!({"id": "9", "type": "author"}));
    }
}
