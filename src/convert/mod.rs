//! The conversion contract and the combinators every document part uses.
//!
//! Each document part implements [`FromJson`] (decode an untyped
//! `serde_json::Value`, collecting every violation) and [`ToJson`] (encode
//! back to wire format). Object-shaped parts read their members through
//! [`Members`] and fold the per-member results together with a
//! [`Reduction`], so unrelated member errors all surface in one pass.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_validate::convert::{FromJson, Members, Reduction};
//! use jsonapi_validate::{ErrorTemplate, ValidationResult};
//! use serde_json::{json, Value};
//! use stillwater::Validation;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Version {
//!     version: String,
//! }
//!
//! impl FromJson for Version {
//!     fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
//!         let members = match Members::of(raw, template, "version") {
//!             Validation::Success(m) => m,
//!             Validation::Failure(e) => return Validation::Failure(e),
//!         };
//!         Reduction::new(Version::default())
//!             .merge(members.required::<String>("version"), |v, s| v.version = s)
//!             .finish()
//!     }
//! }
//!
//! let result = Version::from_json(&json!({"version": "1.0"}), &ErrorTemplate::default());
//! assert!(result.is_success());
//!
//! let result = Version::from_json(&json!({}), &ErrorTemplate::default());
//! assert!(result.is_failure());
//! ```

mod accumulate;
mod members;
mod primitives;
mod traits;

pub use accumulate::{put_key, reduce, Collectable, Member, Reduction};
pub use members::Members;
pub use primitives::decode_array;
pub use traits::{FromJson, ToJson};
