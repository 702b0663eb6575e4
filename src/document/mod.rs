//! Typed JSON:API document parts.
//!
//! Every part implements [`FromJson`](crate::convert::FromJson) and
//! [`ToJson`](crate::convert::ToJson). Free-form members (`attributes`,
//! `meta`) are kept as untouched JSON objects.

mod identifier;
mod jsonapi;
mod linkage;
mod links;
mod relationship;
mod resource;
mod top_level;

use serde_json::{Map, Value};

pub use identifier::ResourceIdentifier;
pub use jsonapi::JsonApi;
pub use linkage::{Linked, LinkedCollection, ResourceLinkage};
pub use links::{Link, Links};
pub use relationship::{Relationship, Relationships};
pub use resource::Resource;
pub use top_level::Document;

/// Non-standard meta-information, passed through as-is.
pub type Meta = Map<String, Value>;

/// A resource's attributes, passed through as-is.
pub type Attributes = Map<String, Value>;
