//! Error types for document violations and encoding failures.
//!
//! Violations found in input are values ([`ValidationError`], gathered into an
//! [`ErrorsDocument`]); [`EncodeError`] covers values that cannot be written
//! back out as JSON:API.

mod errors_document;
mod validation_error;

pub use errors_document::ErrorsDocument;
pub use validation_error::ValidationError;

/// Errors that can occur while encoding a typed document back to JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A document may carry `data` or `errors`, never both.
    #[error("document has both `data` and {0} error(s); only one may be present")]
    ConflictingDataAndErrors(usize),
}
