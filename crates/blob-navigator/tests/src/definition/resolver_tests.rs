use pretty_assertions::assert_eq;

use super::*;
use crate::ide::Range;

fn blob() -> BlobInfo {
    BlobInfo {
        repo_name: "github.com/acme/widgets".to_owned(),
        revision: "main".to_owned(),
        commit_id: "c0ffee".to_owned(),
        file_path: "src/lib.rs".to_owned(),
        content: String::new(),
        lsif: None,
    }
}

fn found(locations: Vec<Location>) -> RemoteLookup<Vec<Location>> {
    RemoteLookup::Found(locations)
}

#[test]
fn loading_defers() {
    assert_eq!(resolve_definition(&blob(), Position::new(0, 0), RemoteLookup::Loading), NavigationAction::Deferred);
}

#[test]
fn no_result_shows_notice() {
    let origin = Position::new(3, 2);
    assert_eq!(
        resolve_definition(&blob(), origin, RemoteLookup::NotFound),
        NavigationAction::Notice(NoticeKind::NoDefinition)
    );
    assert_eq!(resolve_definition(&blob(), origin, found(Vec::new())), NavigationAction::Notice(NoticeKind::NoDefinition));
}

#[test]
fn standing_on_the_definition_shows_notice() {
    let location = Location::new("repo://github.com/acme/widgets@c0ffee/-/raw/src/lib.rs", Some(Range::from_numbers(3, 0, 3, 6)));
    assert_eq!(
        resolve_definition(&blob(), Position::new(3, 2), found(vec![location])),
        NavigationAction::Notice(NoticeKind::AtDefinition)
    );
}

#[test]
fn range_end_is_not_at_the_definition() {
    let location = Location::new("repo://github.com/acme/widgets@c0ffee/-/raw/src/lib.rs", Some(Range::from_numbers(3, 0, 3, 6)));
    let action = resolve_definition(&blob(), Position::new(3, 6), found(vec![location]));
    assert_eq!(
        action,
        NavigationAction::Navigate(NavigationTarget {
            url: "/github.com/acme/widgets@main/-/blob/src/lib.rs?L4:1".to_owned(),
            selection: Some(Range::from_numbers(3, 0, 3, 6)),
        })
    );
}

#[test]
fn same_commit_keeps_revision_label() {
    let location =
        Location::new("repo://github.com/acme/widgets@c0ffee/-/raw/src/other.rs", Some(Range::from_numbers(9, 4, 9, 8)));
    let action = resolve_definition(&blob(), Position::new(3, 2), found(vec![location]));
    assert_eq!(
        action,
        NavigationAction::Navigate(NavigationTarget {
            url: "/github.com/acme/widgets@main/-/blob/src/other.rs?L10:5".to_owned(),
            selection: None,
        })
    );
}

#[test]
fn other_commit_uses_target_commit() {
    let location = Location::new("repo://github.com/acme/dep@deadbeef/-/raw/lib.go", Some(Range::from_numbers(0, 0, 0, 3)));
    let action = resolve_definition(&blob(), Position::new(3, 2), found(vec![location]));
    assert_eq!(
        action,
        NavigationAction::Navigate(NavigationTarget {
            url: "/github.com/acme/dep@deadbeef/-/blob/lib.go?L1:1".to_owned(),
            selection: None,
        })
    );
}

#[test]
fn several_candidates_open_the_definitions_panel() {
    let locations = vec![
        Location::new("repo://github.com/acme/widgets@c0ffee/-/raw/a.rs", Some(Range::from_numbers(0, 0, 0, 1))),
        Location::new("repo://github.com/acme/widgets@c0ffee/-/raw/b.rs", Some(Range::from_numbers(0, 0, 0, 1))),
    ];
    let action = resolve_definition(&blob(), Position::new(3, 2), found(locations));
    assert_eq!(
        action,
        NavigationAction::ShowDefinitions {
            url: "/github.com/acme/widgets@main/-/blob/src/lib.rs?L4:3#tab=def".to_owned(),
            count: 2,
        }
    );
}

#[test]
fn location_without_range_falls_back_to_panel() {
    let location = Location::new("repo://github.com/acme/widgets@c0ffee/-/raw/a.rs", None);
    let action = resolve_definition(&blob(), Position::new(0, 0), found(vec![location]));
    assert!(matches!(action, NavigationAction::ShowDefinitions { count: 1, .. }));
}

#[test]
fn malformed_location_fails_resolution() {
    let location = Location::new("file:///tmp/a.rs", Some(Range::from_numbers(0, 0, 0, 1)));
    assert_eq!(
        resolve_definition(&blob(), Position::new(0, 0), found(vec![location])),
        NavigationAction::Notice(NoticeKind::ResolutionFailed)
    );
}
