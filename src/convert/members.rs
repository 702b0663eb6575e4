//! Member lookup on object-shaped input.

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::ValidationError;
use crate::template::ErrorTemplate;
use crate::ValidationResult;

use super::accumulate::Member;
use super::traits::FromJson;

/// The members of a JSON object being decoded, paired with its template.
///
/// Each lookup yields a [`Member`]: absent optional members are skipped,
/// absent required members become a `missing` error at the object's
/// location, and present members are decoded one level deeper.
#[derive(Debug, Clone, Copy)]
pub struct Members<'a> {
    object: &'a Map<String, Value>,
    template: &'a ErrorTemplate,
}

impl<'a> Members<'a> {
    /// Checks that `raw` is an object, reporting `human_type` otherwise.
    pub fn of(
        raw: &'a Value,
        template: &'a ErrorTemplate,
        human_type: &str,
    ) -> ValidationResult<Members<'a>> {
        match raw.as_object() {
            Some(object) => Validation::Success(Self { object, template }),
            None => Validation::Failure(
                ValidationError::type_mismatch(template, human_type).into(),
            ),
        }
    }

    /// The template for the object itself.
    pub fn template(&self) -> &'a ErrorTemplate {
        self.template
    }

    /// The raw object.
    pub fn object(&self) -> &'a Map<String, Value> {
        self.object
    }

    /// Returns true if the member is present, even if it is `null`.
    pub fn has(&self, name: &str) -> bool {
        self.object.contains_key(name)
    }

    /// Returns the raw member value.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.object.get(name)
    }

    /// Decodes a member that must be present.
    pub fn required<T: FromJson>(&self, name: &str) -> Member<T> {
        match self.object.get(name) {
            Some(raw) => T::from_json(raw, &self.template.descend(name)).into(),
            None => ValidationError::missing(self.template, name).into(),
        }
    }

    /// Decodes a member that may be absent.
    pub fn optional<T: FromJson>(&self, name: &str) -> Member<T> {
        match self.object.get(name) {
            Some(raw) => T::from_json(raw, &self.template.descend(name)).into(),
            None => Member::Absent,
        }
    }

    /// Decodes a member whose presence is required only when `required` holds.
    pub fn required_if<T: FromJson>(&self, name: &str, required: bool) -> Member<T> {
        if required {
            self.required(name)
        } else {
            self.optional(name)
        }
    }

    /// Returns the names from `names` that are present, in the given order.
    pub fn present<'n>(&self, names: &[&'n str]) -> Vec<&'n str> {
        names.iter().copied().filter(|n| self.has(n)).collect()
    }
}
