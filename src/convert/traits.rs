//! Traits implemented by every document part.
//!
//! [`FromJson`] is the decoding half: inspect the shape of an untyped value
//! and either build `Self` or report every violation at its exact location.
//! [`ToJson`] is the encoding half. Together they guarantee that encoding a
//! valid value and decoding it again yields the same value.

use serde_json::Value;

use crate::error::EncodeError;
use crate::template::ErrorTemplate;
use crate::ValidationResult;

/// Decoding from an untyped JSON value.
///
/// Implementations must check the JSON shape of `raw` and report a
/// `type_mismatch` at the template's location when it is wrong. Object-shaped
/// parts attempt every member independently so that all problems surface
/// together; nothing short-circuits on the first failure.
///
/// The `Send` bound lets sibling array elements be decoded on a thread pool
/// when the `parallel` feature is enabled.
pub trait FromJson: Sized + Send {
    /// Decodes `raw`, reporting violations relative to `template`.
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self>;
}

/// Encoding back to wire format.
///
/// Members that are not set are omitted entirely; the only explicit `null`
/// written is an empty to-one linkage.
pub trait ToJson {
    /// Encodes `self` as a JSON value.
    fn to_json(&self) -> Result<Value, EncodeError>;
}
