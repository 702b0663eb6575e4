//! The `include` query parameter.
//!
//! `include=author,comments.author` names relationship paths whose related
//! resources the client wants embedded. Each dotted path becomes a
//! right-nested [`Include`] tree (`comments.author` is `comments` →
//! `author`), and each tree is resolved against a caller-supplied table of
//! known paths.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use stillwater::Validation;

use crate::convert::{reduce, Member};
use crate::error::ValidationError;
use crate::ValidationResult;

/// The query parameter this module reads.
pub const INCLUDE_PARAMETER: &str = "include";

/// One requested relationship path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Include {
    /// A single relationship name.
    Leaf(String),
    /// A relationship name followed by a path into the related resource.
    Nested(String, Box<Include>),
}

impl Include {
    /// Builds the tree for a dotted path, `a.b.c` becoming `a` → `b` → `c`.
    pub fn from_path(path: &str) -> Self {
        match path.split_once('.') {
            Some((head, rest)) => {
                Include::Nested(head.to_string(), Box::new(Include::from_path(rest)))
            }
            None => Include::Leaf(path.to_string()),
        }
    }

    /// The first relationship name on the path.
    pub fn name(&self) -> &str {
        match self {
            Include::Leaf(name) | Include::Nested(name, _) => name.as_str(),
        }
    }

    /// Number of relationship names on the path.
    pub fn depth(&self) -> usize {
        match self {
            Include::Leaf(_) => 1,
            Include::Nested(_, rest) => 1 + rest.depth(),
        }
    }
}

impl From<&str> for Include {
    fn from(path: &str) -> Self {
        Include::from_path(path)
    }
}

impl Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Include::Leaf(name) => write!(f, "{}", name),
            Include::Nested(name, rest) => write!(f, "{}.{}", name, rest),
        }
    }
}

/// The parsed `include` parameter of a fetch request.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexMap;
/// use jsonapi_validate::{Fetch, Include};
///
/// let mut table = IndexMap::new();
/// table.insert(Include::from("author"), "preload author");
/// table.insert(Include::from("comments.author"), "preload comments with authors");
///
/// let fetch = Fetch::from_include("author,comments.author");
/// let preloads = fetch.preloads(&table).into_result().unwrap();
/// assert_eq!(preloads, vec!["preload author", "preload comments with authors"]);
///
/// let unknown = Fetch::from_include("editor").preloads(&table).into_result().unwrap_err();
/// assert_eq!(unknown.first().source.parameter_name(), Some("include"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fetch {
    pub includes: Vec<Include>,
}

impl Fetch {
    /// Parses the value of the `include` parameter.
    ///
    /// An empty value requests nothing.
    pub fn from_include(param: &str) -> Self {
        let includes = if param.is_empty() {
            Vec::new()
        } else {
            param.split(',').map(Include::from_path).collect()
        };
        Self { includes }
    }

    /// Reads the `include` parameter out of decoded query parameters.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        params
            .into_iter()
            .find(|(name, _)| *name == INCLUDE_PARAMETER)
            .map(|(_, value)| Self::from_include(value))
            .unwrap_or_default()
    }

    /// Resolves every include against `table`.
    ///
    /// Each include must match a table key exactly; sub-paths are not tried.
    /// Unknown paths are reported in request order, all of them at once.
    pub fn preloads<P: Clone>(&self, table: &IndexMap<Include, P>) -> ValidationResult<Vec<P>> {
        let results = self.includes.iter().map(|include| match table.get(include) {
            Some(preload) => Member::Present(preload.clone()),
            None => ValidationError::unknown_relationship_path(&include.to_string()).into(),
        });
        let resolved = reduce(results, Vec::with_capacity(self.includes.len()));

        if let Validation::Failure(errors) = &resolved {
            tracing::debug!(
                requested = self.includes.len(),
                unknown = errors.len(),
                "unresolved include paths"
            );
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_and_nested_trees() {
        assert_eq!(Include::from_path("author"), Include::Leaf("author".to_string()));
        assert_eq!(
            Include::from_path("a.b.c"),
            Include::Nested(
                "a".to_string(),
                Box::new(Include::Nested(
                    "b".to_string(),
                    Box::new(Include::Leaf("c".to_string()))
                ))
            )
        );
    }

    #[test]
    fn test_display_round_trips_path() {
        let include = Include::from_path("comments.author.avatar");
        assert_eq!(include.to_string(), "comments.author.avatar");
        assert_eq!(include.name(), "comments");
        assert_eq!(include.depth(), 3);
    }

    #[test]
    fn test_empty_parameter() {
        assert!(Fetch::from_include("").includes.is_empty());
        let resolved = Fetch::from_include("")
            .preloads(&IndexMap::<Include, ()>::new())
            .into_result()
            .unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_from_params() {
        let fetch = Fetch::from_params(vec![("page", "2"), ("include", "author")]);
        assert_eq!(fetch.includes, vec![Include::from("author")]);
        assert!(Fetch::from_params(vec![("sort", "-id")]).includes.is_empty());
    }

    #[test]
    fn test_unknown_paths_reported_in_order() {
        let mut table = IndexMap::new();
        table.insert(Include::from("author"), 1);

        let errors = Fetch::from_include("x,author,y.z")
            .preloads(&table)
            .into_result()
            .unwrap_err();

        let paths: Vec<_> = errors
            .iter()
            .filter_map(|e| e.meta.as_ref().and_then(|m| m.get("relationship_path")))
            .filter_map(|p| p.as_str())
            .collect();
        assert_eq!(paths, vec!["x", "y.z"]);
        assert!(errors.iter().all(|e| e.source.parameter_name() == Some("include")));
    }

    #[test]
    fn test_sub_paths_are_not_looked_up() {
        let mut table = IndexMap::new();
        table.insert(Include::from("comments"), "comments");

        let errors = Fetch::from_include("comments.author")
            .preloads(&table)
            .into_result()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
