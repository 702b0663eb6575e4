//! Relationship objects.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::convert::{FromJson, Members, Reduction, ToJson};
use crate::error::{EncodeError, ValidationError};
use crate::template::ErrorTemplate;
use crate::ValidationResult;

use super::{Links, Meta, ResourceLinkage};

/// Relationship name to relationship.
pub type Relationships = IndexMap<String, Relationship>;

const CHILDREN: [&str; 3] = ["data", "links", "meta"];

/// A relationship: at least one of `data`, `links` or `meta`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relationship {
    /// `None` when the member is absent; `Some(ResourceLinkage::Empty)` for `null`.
    pub data: Option<ResourceLinkage>,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}

impl Relationship {
    /// A relationship carrying only linkage.
    pub fn with_data(data: ResourceLinkage) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }
}

impl FromJson for Relationship {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        let members = match Members::of(raw, template, "relationship") {
            Validation::Success(m) => m,
            Validation::Failure(e) => return Validation::Failure(e),
        };

        let reduction = Reduction::new(Relationship::default())
            .merge(members.optional::<ResourceLinkage>("data"), |r, d| {
                r.data = Some(d)
            })
            .merge(members.optional::<Links>("links"), |r, l| r.links = Some(l))
            .merge(members.optional::<Meta>("meta"), |r, m| r.meta = Some(m));

        if members.present(&CHILDREN).is_empty() {
            reduction
                .reject(ValidationError::minimum_children(template, &CHILDREN))
                .finish()
        } else {
            reduction.finish()
        }
    }
}

impl ToJson for Relationship {
    fn to_json(&self) -> Result<Value, EncodeError> {
        let mut object = Map::new();
        if let Some(data) = &self.data {
            object.insert("data".to_string(), data.to_json()?);
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
