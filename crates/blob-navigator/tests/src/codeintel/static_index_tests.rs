use pretty_assertions::assert_eq;

use super::*;
use crate::ide::Position;

const INDEX: &str = r#"{
    "definitions": [
        {
            "uri": "repo://r@abc/-/raw/a.rs",
            "range": { "start": { "line": 0, "character": 3 }, "end": { "line": 0, "character": 7 } },
            "locations": [
                { "uri": "repo://r@abc/-/raw/b.rs", "range": { "start": { "line": 4, "character": 0 }, "end": { "line": 4, "character": 4 } } }
            ]
        },
        {
            "uri": "repo://r@abc/-/raw/a.rs",
            "range": { "start": { "line": 2, "character": 0 }, "end": { "line": 2, "character": 2 } },
            "loading": true
        }
    ],
    "hovers": [
        {
            "uri": "repo://r/-/raw/a.rs",
            "range": { "start": { "line": 0, "character": 3 }, "end": { "line": 0, "character": 7 } },
            "contents": { "contents": [ { "kind": "markdown", "value": "```rust\nfn main()\n```" } ] }
        }
    ],
    "rangeDefinitions": [
        {
            "repoName": "r",
            "filePath": "a.rs",
            "range": { "start": { "line": 0, "character": 3 }, "end": { "line": 0, "character": 7 } },
            "definition": { "repository": "r", "commit": "abc", "path": "b.rs", "range": { "start": { "line": 4, "character": 0 }, "end": { "line": 4, "character": 4 } } }
        }
    ],
    "blame": [
        { "repoName": "r", "filePath": "a.rs", "hunks": [] }
    ]
}"#;

#[tokio::test]
async fn definitions_match_by_document_and_containing_range() {
    let index = StaticCodeIntel::from_json(INDEX).expect("index decodes");
    let found = index.definition(PositionParams::new("repo://r@main/-/raw/a.rs", Position::new(0, 5))).await.unwrap();
    assert!(!found.is_loading);
    assert_eq!(found.result.len(), 1);
    assert_eq!(found.result[0].uri, "repo://r@abc/-/raw/b.rs");

    let missing = index.definition(PositionParams::new("repo://r@abc/-/raw/a.rs", Position::new(1, 0))).await.unwrap();
    assert_eq!(missing, MaybeLoadingResult::loaded(Vec::new()));

    let loading = index.definition(PositionParams::new("repo://r@abc/-/raw/a.rs", Position::new(2, 1))).await.unwrap();
    assert!(loading.is_loading);
}

#[tokio::test]
async fn hovers_are_looked_up_like_definitions() {
    let index = StaticCodeIntel::from_json(INDEX).expect("index decodes");
    let hover = index.hover(PositionParams::new("repo://r@abc/-/raw/a.rs", Position::new(0, 3))).await.unwrap();
    assert!(hover.result.is_some());
    let none = index.hover(PositionParams::new("repo://r@abc/-/raw/a.rs", Position::new(0, 7))).await.unwrap();
    assert_eq!(none.result, None);
}

#[tokio::test]
async fn range_definitions_answer_every_requested_range() {
    let index = StaticCodeIntel::from_json(INDEX).expect("index decodes");
    let request = RangeDefinitionsRequest {
        repo_name: "r".to_owned(),
        revision: "abc".to_owned(),
        file_path: "a.rs".to_owned(),
        ranges: vec![Range::from_numbers(0, 3, 0, 7), Range::from_numbers(1, 0, 1, 2)],
    };
    let definitions = index.definitions_for_ranges(request).await.unwrap();
    assert_eq!(definitions.len(), 2);
    assert_eq!(definitions[0].definition.as_ref().map(|d| d.path.as_str()), Some("b.rs"));
    assert_eq!(definitions[1].definition, None);
}

#[tokio::test]
async fn blame_entries_without_revision_match_any_revision() {
    let index = StaticCodeIntel::from_json(INDEX).expect("index decodes");
    let hunks = index.blame_hunks(&BlameKey::new("r", "feature", "a.rs")).await.unwrap();
    assert!(hunks.is_empty());
}

#[test]
fn malformed_index_is_an_error() {
    assert!(matches!(StaticCodeIntel::from_json("{"), Err(StaticIndexError::Json(_))));
}
