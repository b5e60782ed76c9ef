use super::*;

#[test]
fn decodes_three_and_four_element_ranges() {
    let json = r#"{"occurrences":[
        {"range":[0,4,7],"syntaxKind":15},
        {"range":[2,0,4,1],"syntaxKind":1},
        {"range":[5,1,3]}
    ]}"#;
    let occurrences = decode_occurrences(json).expect("valid document");
    assert_eq!(occurrences.len(), 3);
    assert_eq!(occurrences[0].range, Range::from_numbers(0, 4, 0, 7));
    assert_eq!(occurrences[0].kind, Some(SyntaxKind::IdentifierFunction));
    assert_eq!(occurrences[1].range, Range::from_numbers(2, 0, 4, 1));
    assert_eq!(occurrences[1].kind, Some(SyntaxKind::Comment));
    assert_eq!(occurrences[2].kind, None);
}

#[test]
fn unspecified_and_unknown_kinds_decode_to_none() {
    let json = r#"{"occurrences":[{"range":[0,0,1],"syntaxKind":0},{"range":[0,2,3],"syntaxKind":99}]}"#;
    let occurrences = decode_occurrences(json).expect("valid document");
    assert!(occurrences.iter().all(|occurrence| occurrence.kind.is_none()));
}

#[test]
fn rejects_malformed_ranges() {
    for json in [
        r#"{"occurrences":[{"range":[0,1]}]}"#,
        r#"{"occurrences":[{"range":[0,-1,3]}]}"#,
        r#"{"occurrences":[{"range":[0,5,2]}]}"#,
        r#"{"occurrences":[{"range":[3,0,1,0]}]}"#,
    ] {
        let error = decode_occurrences(json).expect_err("range must be rejected");
        assert!(matches!(error, OccurrenceDecodeError::InvalidRange { index: 0, .. }), "{json}: {error}");
    }
}

#[test]
fn missing_occurrence_document_yields_no_occurrences() {
    let blob = BlobInfo {
        repo_name: "github.com/example/repo".into(),
        revision: "main".into(),
        commit_id: "abc".into(),
        file_path: "src/lib.rs".into(),
        content: "fn main() {}\n".into(),
        lsif: None,
    };
    assert!(occurrences_from_blob(&blob).expect("no document is fine").is_empty());
}

#[test]
fn invalid_json_is_an_error() {
    assert!(matches!(decode_occurrences("{"), Err(OccurrenceDecodeError::Json(_))));
}
