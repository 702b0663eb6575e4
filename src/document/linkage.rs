//! Resource linkage: the polymorphic `data` member.
//!
//! The same member can hold `null`, `[]`, one object or a list of objects,
//! and each object can be a full resource or a bare identifier. Decoding
//! classifies the raw shape first and only then recurses:
//!
//! - `null` is an empty to-one linkage
//! - `[]` is an empty to-many linkage
//! - an object carrying `attributes` or `relationships` is a resource, as is
//!   an id-less object when the context lets resources omit their id; any
//!   other object is a resource identifier
//! - a non-empty array decodes each element with the object rule, and every
//!   element must have come out as the same variant
//! - anything else is a type error

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::convert::{decode_array, FromJson, ToJson};
use crate::error::{EncodeError, ValidationError};
use crate::template::ErrorTemplate;
use crate::ValidationResult;

use super::{Resource, ResourceIdentifier};

const HUMAN_TYPE: &str = "resource linkage";

/// A single linked object: a full resource or a bare identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Linked {
    Resource(Resource),
    Identifier(ResourceIdentifier),
}

impl Linked {
    /// The `type` of the linked object.
    pub fn kind(&self) -> &str {
        match self {
            Linked::Resource(resource) => resource.kind.as_str(),
            Linked::Identifier(identifier) => identifier.kind.as_str(),
        }
    }

    /// The `id` of the linked object, if it has one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Linked::Resource(resource) => resource.id.as_deref(),
            Linked::Identifier(identifier) => Some(identifier.id.as_str()),
        }
    }
}

/// Whether an object must be read as a full resource.
///
/// Only resources may carry `attributes` or `relationships`. An object
/// without an `id` is also a resource when the context lets resources omit
/// their id, since an identifier can never be valid without one.
///
/// Under that context a list such as `[{"type": "a"}, {"type": "a", "id": "1"}]`
/// classifies its elements differently (resource, then identifier). Both
/// decode cleanly, so the list is reported as one mixed-linkage type error at
/// the array, not as a missing `id`.
fn is_resource(object: &Map<String, Value>, template: &ErrorTemplate) -> bool {
    object.contains_key("attributes")
        || object.contains_key("relationships")
        || (!template.requires_resource_id() && !object.contains_key("id"))
}

impl FromJson for Linked {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        match raw.as_object() {
            Some(object) if is_resource(object, template) => {
                tracing::trace!(pointer = template.pointer(), "linkage object is a resource");
                Resource::from_json(raw, template).map(Linked::Resource)
            }
            _ => {
                tracing::trace!(pointer = template.pointer(), "linkage object is an identifier");
                ResourceIdentifier::from_json(raw, template).map(Linked::Identifier)
            }
        }
    }
}

impl ToJson for Linked {
    fn to_json(&self) -> Result<Value, EncodeError> {
        match self {
            Linked::Resource(resource) => resource.to_json(),
            Linked::Identifier(identifier) => identifier.to_json(),
        }
    }
}

/// A non-empty, homogeneous list of linked objects.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkedCollection {
    Resources(Vec<Resource>),
    Identifiers(Vec<ResourceIdentifier>),
}

impl LinkedCollection {
    pub fn len(&self) -> usize {
        match self {
            LinkedCollection::Resources(resources) => resources.len(),
            LinkedCollection::Identifiers(identifiers) => identifiers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits decoded elements into one variant, or `None` if they are mixed.
    fn homogeneous(items: Vec<Linked>) -> Option<Self> {
        let resources = items.iter().all(|item| matches!(item, Linked::Resource(_)));
        if resources {
            return Some(LinkedCollection::Resources(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Linked::Resource(resource) => Some(resource),
                        Linked::Identifier(_) => None,
                    })
                    .collect(),
            ));
        }

        let mut identifiers = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Linked::Identifier(identifier) => identifiers.push(identifier),
                Linked::Resource(_) => return None,
            }
        }
        Some(LinkedCollection::Identifiers(identifiers))
    }
}

/// The value of a `data` member.
///
/// # Example
///
/// ```rust
/// use jsonapi_validate::convert::FromJson;
/// use jsonapi_validate::{ErrorTemplate, ResourceLinkage};
/// use serde_json::json;
///
/// let template = ErrorTemplate::default().descend("data");
///
/// let empty = ResourceLinkage::from_json(&json!(null), &template);
/// assert_eq!(empty.into_result().unwrap(), ResourceLinkage::Empty);
///
/// let mixed = json!([
///     {"type": "a", "id": "1"},
///     {"type": "a", "id": "2", "attributes": {}}
/// ]);
/// let errors = ResourceLinkage::from_json(&mixed, &template).into_result().unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().source.pointer(), Some("/data"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceLinkage {
    /// Empty to-one linkage, encoded as `null`.
    Empty,
    /// Empty to-many linkage, encoded as `[]`.
    EmptyCollection,
    /// A to-one linkage.
    Single(Linked),
    /// A non-empty to-many linkage.
    Collection(LinkedCollection),
}

impl ResourceLinkage {
    /// A to-many linkage of full resources; empty input gives `EmptyCollection`.
    pub fn resources(resources: Vec<Resource>) -> Self {
        if resources.is_empty() {
            ResourceLinkage::EmptyCollection
        } else {
            ResourceLinkage::Collection(LinkedCollection::Resources(resources))
        }
    }

    /// A to-many linkage of identifiers; empty input gives `EmptyCollection`.
    pub fn identifiers(identifiers: Vec<ResourceIdentifier>) -> Self {
        if identifiers.is_empty() {
            ResourceLinkage::EmptyCollection
        } else {
            ResourceLinkage::Collection(LinkedCollection::Identifiers(identifiers))
        }
    }

    /// Returns true for the array-shaped variants.
    pub fn is_to_many(&self) -> bool {
        matches!(
            self,
            ResourceLinkage::EmptyCollection | ResourceLinkage::Collection(_)
        )
    }

    /// All full resources in this linkage, in order.
    pub fn linked_resources(&self) -> Vec<&Resource> {
        match self {
            ResourceLinkage::Single(Linked::Resource(resource)) => vec![resource],
            ResourceLinkage::Collection(LinkedCollection::Resources(resources)) => {
                resources.iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// All bare identifiers in this linkage, in order.
    pub fn linked_identifiers(&self) -> Vec<&ResourceIdentifier> {
        match self {
            ResourceLinkage::Single(Linked::Identifier(identifier)) => vec![identifier],
            ResourceLinkage::Collection(LinkedCollection::Identifiers(identifiers)) => {
                identifiers.iter().collect()
            }
            _ => Vec::new(),
        }
    }
}

impl FromJson for ResourceLinkage {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        match raw {
            Value::Null => Validation::Success(ResourceLinkage::Empty),
            Value::Array(items) if items.is_empty() => {
                Validation::Success(ResourceLinkage::EmptyCollection)
            }
            Value::Array(items) => match decode_array::<Linked>(items, template) {
                Validation::Success(linked) => match LinkedCollection::homogeneous(linked) {
                    Some(collection) => {
                        Validation::Success(ResourceLinkage::Collection(collection))
                    }
                    None => Validation::Failure(
                        ValidationError::type_mismatch(template, HUMAN_TYPE).into(),
                    ),
                },
                Validation::Failure(e) => Validation::Failure(e),
            },
            Value::Object(_) => Linked::from_json(raw, template).map(ResourceLinkage::Single),
            _ => Validation::Failure(ValidationError::type_mismatch(template, HUMAN_TYPE).into()),
        }
    }
}

impl ToJson for ResourceLinkage {
    fn to_json(&self) -> Result<Value, EncodeError> {
        Ok(match self {
            ResourceLinkage::Empty => Value::Null,
            ResourceLinkage::EmptyCollection => Value::Array(Vec::new()),
            ResourceLinkage::Single(linked) => linked.to_json()?,
            ResourceLinkage::Collection(LinkedCollection::Resources(resources)) => Value::Array(
                resources
                    .iter()
                    .map(ToJson::to_json)
                    .collect::<Result<_, _>>()?,
            ),
            ResourceLinkage::Collection(LinkedCollection::Identifiers(identifiers)) => {
                Value::Array(
                    identifiers
                        .iter()
                        .map(ToJson::to_json)
                        .collect::<Result<_, _>>()?,
                )
            }
        })
    }
}
