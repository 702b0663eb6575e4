//! Accumulate-all combinators.
//!
//! A conversion builds its value one member (or element) at a time. Each
//! step yields a [`Member`]: absent, present with a decoded value, or invalid
//! with the errors found. A [`Reduction`] folds those steps into a
//! collectable (a list, a map, or a partially filled record):
//!
//! - success + present: the value is placed into the collectable
//! - success + invalid: the reduction turns into a failure
//! - failure + present: the value is discarded
//! - failure + invalid: the errors are combined, in order
//! - anything + absent: unchanged
//!
//! Every member is decoded before merging, so a failed reduction reports the
//! union of all member errors at that level.

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::{ErrorsDocument, ValidationError};
use crate::ValidationResult;

/// The outcome of decoding one member or element.
#[derive(Debug, Clone, PartialEq)]
pub enum Member<T> {
    /// The member is not present and not required.
    Absent,
    /// The member decoded successfully.
    Present(T),
    /// The member is missing or failed to decode.
    Invalid(ErrorsDocument),
}

impl<T> Member<T> {
    /// Returns true if the member was present and valid.
    pub fn is_present(&self) -> bool {
        matches!(self, Member::Present(_))
    }

    /// Transforms the present value, leaving absence and errors untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Member<U> {
        match self {
            Member::Absent => Member::Absent,
            Member::Present(value) => Member::Present(f(value)),
            Member::Invalid(errors) => Member::Invalid(errors),
        }
    }
}

impl<T> From<ValidationResult<T>> for Member<T> {
    fn from(result: ValidationResult<T>) -> Self {
        match result {
            Validation::Success(value) => Member::Present(value),
            Validation::Failure(errors) => Member::Invalid(errors),
        }
    }
}

impl<T> From<ValidationError> for Member<T> {
    fn from(error: ValidationError) -> Self {
        Member::Invalid(ErrorsDocument::single(error))
    }
}

/// Tags a decoded value with the key it belongs under.
///
/// Errors pass through untouched.
pub fn put_key<T>(key: impl Into<String>, result: ValidationResult<T>) -> Member<(String, T)> {
    match result {
        Validation::Success(value) => Member::Present((key.into(), value)),
        Validation::Failure(errors) => Member::Invalid(errors),
    }
}

/// A container that successive successes are placed into.
pub trait Collectable<T> {
    fn put(&mut self, item: T);
}

impl<T> Collectable<T> for Vec<T> {
    fn put(&mut self, item: T) {
        self.push(item);
    }
}

impl<V> Collectable<(String, V)> for IndexMap<String, V> {
    fn put(&mut self, (key, value): (String, V)) {
        self.insert(key, value);
    }
}

/// An in-progress fold of member results into a collectable.
///
/// # Example
///
/// ```rust
/// use jsonapi_validate::convert::{Member, Reduction};
///
/// let result = Reduction::new(Vec::new())
///     .collect(Member::Present(1))
///     .collect(Member::Absent)
///     .collect(Member::Present(2))
///     .finish();
///
/// assert_eq!(result.into_result().unwrap(), vec![1, 2]);
/// ```
pub struct Reduction<C> {
    state: ValidationResult<C>,
}

impl<C> Reduction<C> {
    /// Starts a reduction from an initial collectable.
    pub fn new(initial: C) -> Self {
        Self {
            state: Validation::Success(initial),
        }
    }

    /// Merges one member result, using `place` to put a present value into
    /// the collectable.
    pub fn merge<T>(self, incoming: Member<T>, place: impl FnOnce(&mut C, T)) -> Self {
        let state = match (self.state, incoming) {
            (state, Member::Absent) => state,
            (Validation::Success(mut collected), Member::Present(value)) => {
                place(&mut collected, value);
                Validation::Success(collected)
            }
            (Validation::Success(_), Member::Invalid(errors)) => Validation::Failure(errors),
            (Validation::Failure(errors), Member::Present(_)) => Validation::Failure(errors),
            (Validation::Failure(errors), Member::Invalid(more)) => {
                Validation::Failure(errors.merge(more))
            }
        };
        Self { state }
    }

    /// Merges one member result into a list or map collectable.
    pub fn collect<T>(self, incoming: Member<T>) -> Self
    where
        C: Collectable<T>,
    {
        self.merge(incoming, |collected, value| collected.put(value))
    }

    /// Records a violation found by a check spanning several members.
    pub fn reject(self, error: ValidationError) -> Self {
        self.merge::<()>(error.into(), |_, _| {})
    }

    /// Returns true if no errors have been merged so far.
    pub fn is_success(&self) -> bool {
        self.state.is_success()
    }

    /// Ends the reduction.
    pub fn finish(self) -> ValidationResult<C> {
        self.state
    }
}

/// Folds every result into `initial`, skipping absent members.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexMap;
/// use jsonapi_validate::convert::{put_key, reduce};
/// use stillwater::Validation;
///
/// let results = vec![
///     put_key("a", Validation::Success(1)),
///     put_key("b", Validation::Success(2)),
/// ];
/// let map = reduce(results, IndexMap::new()).into_result().unwrap();
///
/// assert_eq!(map.get("b"), Some(&2));
/// ```
pub fn reduce<C, T, I>(results: I, initial: C) -> ValidationResult<C>
where
    C: Collectable<T>,
    I: IntoIterator<Item = Member<T>>,
{
    results
        .into_iter()
        .fold(Reduction::new(initial), Reduction::collect)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ErrorSource;
    use crate::template::ErrorTemplate;

    fn invalid<T>(pointer: &str) -> Member<T> {
        ValidationError::type_mismatch(
            &ErrorTemplate::default().with_source(ErrorSource::pointer_at(pointer)),
            "string",
        )
        .into()
    }

    fn pointers<T: std::fmt::Debug>(result: ValidationResult<T>) -> Vec<String> {
        result
            .into_result()
            .unwrap_err()
            .iter()
            .filter_map(|e| e.source.pointer().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_success_collects_in_order() {
        let result = reduce(
            vec![Member::Present("a"), Member::Absent, Member::Present("b")],
            Vec::new(),
        );
        assert_eq!(result.into_result().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_first_error_turns_reduction_into_failure() {
        let result = reduce(
            vec![Member::Present(1), invalid("/1"), Member::Present(3)],
            Vec::new(),
        );
        assert_eq!(pointers(result), vec!["/1"]);
    }

    #[test]
    fn test_errors_accumulate_in_source_order() {
        let result = reduce(
            vec![invalid("/0"), Member::Present(1), invalid("/2"), invalid("/3")],
            Vec::<i32>::new(),
        );
        assert_eq!(pointers(result), vec!["/0", "/2", "/3"]);
    }

    #[test]
    fn test_put_key_into_map() {
        let result = reduce(
            vec![
                put_key("z", Validation::Success(1)),
                put_key("a", Validation::Success(2)),
            ],
            IndexMap::new(),
        );
        let map = result.into_result().unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_put_key_passes_errors_through() {
        let errors =
            ErrorsDocument::single(ValidationError::missing(&ErrorTemplate::default(), "x"));
        let member: Member<(String, i32)> = put_key("k", Validation::Failure(errors.clone()));
        assert_eq!(member, Member::Invalid(errors));
    }

    #[test]
    fn test_record_merge_with_place() {
        #[derive(Debug, Default, PartialEq)]
        struct Pair {
            left: i32,
            right: Option<&'static str>,
        }

        let result = Reduction::new(Pair::default())
            .merge(Member::Present(7), |p, v| p.left = v)
            .merge(Member::Present("r"), |p, v| p.right = Some(v))
            .finish();
        assert_eq!(
            result.into_result().unwrap(),
            Pair {
                left: 7,
                right: Some("r")
            }
        );
    }

    #[test]
    fn test_reject_adds_error_after_member_errors() {
        let result = Reduction::new(Vec::<i32>::new())
            .collect(invalid("/a"))
            .reject(ValidationError::minimum_children(
                &ErrorTemplate::default(),
                &["x"],
            ))
            .finish();
        assert_eq!(pointers(result), vec!["/a", ""]);
    }

    #[test]
    fn test_member_map() {
        assert_eq!(Member::Present(2).map(|v| v * 2), Member::Present(4));
        assert_eq!(Member::<i32>::Absent.map(|v| v * 2), Member::Absent);
    }
}
