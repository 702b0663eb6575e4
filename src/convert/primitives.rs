//! Conversions for leaf values and arrays.

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{EncodeError, ValidationError};
use crate::template::ErrorTemplate;
use crate::ValidationResult;

use super::accumulate::{reduce, Member};
use super::traits::{FromJson, ToJson};

impl FromJson for String {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        match raw {
            Value::String(s) => Validation::Success(s.clone()),
            _ => Validation::Failure(ValidationError::type_mismatch(template, "string").into()),
        }
    }
}

impl ToJson for String {
    fn to_json(&self) -> Result<Value, EncodeError> {
        Ok(Value::String(self.clone()))
    }
}

/// Arbitrary objects (`meta`, `attributes`) pass through unchanged.
impl FromJson for Map<String, Value> {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        match raw {
            Value::Object(object) => Validation::Success(object.clone()),
            _ => Validation::Failure(ValidationError::type_mismatch(template, "object").into()),
        }
    }
}

impl ToJson for Map<String, Value> {
    fn to_json(&self) -> Result<Value, EncodeError> {
        Ok(Value::Object(self.clone()))
    }
}

/// Decodes every element of an array, each one level deeper by index.
///
/// All elements are attempted; errors come back in element order.
#[cfg(not(feature = "parallel"))]
pub fn decode_array<T: FromJson>(
    items: &[Value],
    template: &ErrorTemplate,
) -> ValidationResult<Vec<T>> {
    let results = items
        .iter()
        .enumerate()
        .map(|(index, item)| Member::from(T::from_json(item, &template.descend(index))));
    reduce(results, Vec::with_capacity(items.len()))
}

/// Decodes every element of an array, each one level deeper by index.
///
/// Elements are decoded on the rayon pool; results are merged in element
/// order, so the outcome matches the sequential decoder exactly.
#[cfg(feature = "parallel")]
pub fn decode_array<T: FromJson>(
    items: &[Value],
    template: &ErrorTemplate,
) -> ValidationResult<Vec<T>> {
    use rayon::prelude::*;

    let results: Vec<Member<T>> = items
        .par_iter()
        .enumerate()
        .map(|(index, item)| Member::from(T::from_json(item, &template.descend(index))))
        .collect();
    reduce(results, Vec::with_capacity(items.len()))
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(raw: &Value, template: &ErrorTemplate) -> ValidationResult<Self> {
        match raw {
            Value::Array(items) => decode_array(items, template),
            _ => Validation::Failure(ValidationError::type_mismatch(template, "array").into()),
        }
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Result<Value, EncodeError> {
        self.iter()
            .map(ToJson::to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}
