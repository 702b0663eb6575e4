//! Links objects.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::convert::{put_key, reduce, FromJson, Members, Reduction, ToJson};
use crate::error::{EncodeError, ValidationError};
use crate::template::ErrorTemplate;
use crate::ValidationResult;

use super::Meta;

/// A links object: link name (`self`, `related`, `about`, ...) to link.
pub type Links = IndexMap<String, Link>;

/// A single link.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    /// A bare URL string.
    Url(String),
    /// A link object with an `href` and optional `meta`.
    Object { href: String, meta: Option<Meta> },
    /// An explicit `null`: the link is known not to exist.
    Null,
}

impl Link {
    /// The URL of the link, if it has one.
    pub fn href(&self) -> Option<&str> {
        match self {
            Link::Url(href) | Link::Object { href, .. } => Some(href.as_str()),
            Link::Null => None,
        }
    }
}

impl FromJson for Link {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        match raw {
            Value::Null => Validation::Success(Link::Null),
            Value::String(href) => Validation::Success(Link::Url(href.clone())),
            Value::Object(_) => {
                let members = match Members::of(raw, template, "link object") {
                    Validation::Success(m) => m,
                    Validation::Failure(e) => return Validation::Failure(e),
                };
                Reduction::new((String::new(), None::<Meta>))
                    .merge(members.required::<String>("href"), |link, href| link.0 = href)
                    .merge(members.optional::<Meta>("meta"), |link, meta| {
                        link.1 = Some(meta)
                    })
                    .finish()
                    .map(|(href, meta)| Link::Object { href, meta })
            }
            _ => Validation::Failure(ValidationError::type_mismatch(template, "link").into()),
        }
    }
}

impl ToJson for Link {
    fn to_json(&self) -> Result<Value, EncodeError> {
        Ok(match self {
            Link::Url(href) => Value::String(href.clone()),
            Link::Object { href, meta } => {
                let mut object = Map::new();
                object.insert("href".to_string(), Value::String(href.clone()));
                if let Some(meta) = meta {
                    object.insert("meta".to_string(), Value::Object(meta.clone()));
                }
                Value::Object(object)
            }
            Link::Null => Value::Null,
        })
    }
}

/// Keyed objects (`links`, `relationships`) decode every entry by name.
impl<T: FromJson> FromJson for IndexMap<String, T> {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        match raw.as_object() {
            Some(object) => {
                let entries = object.iter().map(|(name, value)| {
                    let member = template.descend(name.as_str());
                    put_key(name.clone(), T::from_json(value, &member))
                });
                reduce(entries, IndexMap::with_capacity(object.len()))
            }
            None => Validation::Failure(ValidationError::type_mismatch(template, "object").into()),
        }
    }
}

impl<T: ToJson> ToJson for IndexMap<String, T> {
    fn to_json(&self) -> Result<Value, EncodeError> {
        let mut object = Map::new();
        for (name, value) in self {
            object.insert(name.clone(), value.to_json()?);
        }
        Ok(Value::Object(object))
    }
}
