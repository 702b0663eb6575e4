//! # jsonapi-validate
//!
//! Parses JSON:API documents into typed values and reports every problem
//! in one pass, each error carrying the JSON Pointer of the offending
//! member.
//!
//! ## Overview
//!
//! Decoding never stops at the first failure. Every part of a document is
//! decoded independently and the outcomes are merged with stillwater's
//! `Validation`, so a document with a bad `id` and a missing `type` reports
//! both. The errors themselves are JSON:API error objects and can be sent
//! straight back to the client as an errors document.
//!
//! ## Core Types
//!
//! - [`Document`]: a top-level document, decoded with [`Document::parse`]
//! - [`ResourceLinkage`]: the polymorphic `data` member
//! - [`ErrorTemplate`]: where a value sits and which request it belongs to
//! - [`ValidationError`]: a single JSON:API error object
//! - [`ErrorsDocument`]: a non-empty, ordered collection of errors
//! - [`Fetch`]: the `include` query parameter, resolved against known paths
//!
//! ## Example
//!
//! ```rust
//! use jsonapi_validate::{Action, Document, Sender};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "data": {
//!         "type": "articles",
//!         "attributes": {"title": "Hello"},
//!         "relationships": {"author": {}}
//!     }
//! });
//!
//! // An update must name the resource it changes, and every relationship
//! // needs at least one of `data`, `links` or `meta`.
//! let errors = Document::parse(&raw, Action::Update, Sender::Client)
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(errors.len(), 2);
//!
//! // The same body is a valid create request.
//! let created = Document::parse(
//!     &json!({"data": {"type": "articles", "attributes": {"title": "Hello"}}}),
//!     Action::Create,
//!     Sender::Client,
//! );
//! assert!(created.is_success());
//! ```

pub mod convert;
pub mod document;
pub mod error;
pub mod fetch;
pub mod source;
pub mod template;

pub use document::{
    Attributes, Document, JsonApi, Link, Linked, LinkedCollection, Links, Meta, Relationship,
    Relationships, Resource, ResourceIdentifier, ResourceLinkage,
};
pub use error::{EncodeError, ErrorsDocument, ValidationError};
pub use fetch::{Fetch, Include};
pub use source::{ErrorSource, Segment};
pub use template::{Action, ContextError, ErrorTemplate, Sender};

/// Type alias for decoding results using ErrorsDocument
pub type ValidationResult<T> = stillwater::Validation<T, ErrorsDocument>;
