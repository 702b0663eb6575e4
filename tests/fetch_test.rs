//! Integration tests for include path resolution.

use indexmap::IndexMap;
use jsonapi_validate::fetch::INCLUDE_PARAMETER;
use jsonapi_validate::{Document, Fetch, Include};

#[derive(Debug, Clone, PartialEq)]
enum Preload {
    Author,
    Comments,
    CommentAuthors,
}

fn table() -> IndexMap<Include, Preload> {
    let mut table = IndexMap::new();
    table.insert(Include::from("author"), Preload::Author);
    table.insert(Include::from("comments"), Preload::Comments);
    table.insert(Include::from("comments.author"), Preload::CommentAuthors);
    table
}

#[test]
fn test_known_paths_resolve_in_request_order() {
    let preloads = Fetch::from_include("comments.author,author")
        .preloads(&table())
        .into_result()
        .unwrap();
    assert_eq!(preloads, vec![Preload::CommentAuthors, Preload::Author]);
}

#[test]
fn test_every_unknown_path_is_reported() {
    let errors = Fetch::from_include("author,editor,comments.likes,tags")
        .preloads(&table())
        .into_result()
        .unwrap_err();

    assert_eq!(errors.len(), 3);
    let details: Vec<_> = errors.iter().filter_map(|e| e.detail.as_deref()).collect();
    assert_eq!(
        details,
        vec![
            "`editor` is an unknown relationship path",
            "`comments.likes` is an unknown relationship path",
            "`tags` is an unknown relationship path",
        ]
    );
    assert!(errors
        .iter()
        .all(|e| e.source.parameter_name() == Some(INCLUDE_PARAMETER)));
}

#[test]
fn test_unknown_paths_become_an_errors_document() {
    let errors = Fetch::from_include("editor")
        .preloads(&table())
        .into_result()
        .unwrap_err();

    let encoded = Document::from(errors).encode().unwrap();
    assert_eq!(
        encoded["errors"][0]["source"],
        serde_json::json!({"parameter": "include"})
    );
    assert_eq!(encoded["errors"][0]["status"], "422");
}

#[test]
fn test_query_parameters() {
    let params = [("fields[articles]", "title"), ("include", "author,comments")];
    let fetch = Fetch::from_params(params);

    assert_eq!(fetch.includes.len(), 2);
    assert_eq!(fetch.includes[1].name(), "comments");
    assert_eq!(
        fetch.preloads(&table()).into_result().unwrap(),
        vec![Preload::Author, Preload::Comments]
    );
}

#[test]
fn test_no_include_parameter_requests_nothing() {
    let fetch = Fetch::from_params([("page[size]", "10")]);
    assert_eq!(fetch, Fetch::default());
    assert!(fetch.preloads(&table()).into_result().unwrap().is_empty());
}
