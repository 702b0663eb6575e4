//! The top-level `jsonapi` object.

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::convert::{FromJson, Members, Reduction, ToJson};
use crate::error::EncodeError;
use crate::template::ErrorTemplate;
use crate::ValidationResult;

use super::Meta;

/// Describes the server's implementation: `{"version": "1.0"}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonApi {
    pub version: Option<String>,
    pub meta: Option<Meta>,
}

impl FromJson for JsonApi {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        let members = match Members::of(raw, template, "jsonapi object") {
            Validation::Success(m) => m,
            Validation::Failure(e) => return Validation::Failure(e),
        };

        Reduction::new(JsonApi::default())
            .merge(members.optional::<String>("version"), |j, v| j.version = Some(v))
            .merge(members.optional::<Meta>("meta"), |j, m| j.meta = Some(m))
            .finish()
    }
}

impl ToJson for JsonApi {
    fn to_json(&self) -> Result<Value, EncodeError> {
        let mut object = Map::new();
        if let Some(version) = &self.version {
            object.insert("version".to_string(), Value::String(version.clone()));
        }
        if let Some(meta) = &self.meta {
            object.insert("meta".to_string(), Value::Object(meta.clone()));
        }
        Ok(Value::Object(object))
    }
}
