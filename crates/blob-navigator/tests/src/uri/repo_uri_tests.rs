use super::*;

#[test]
fn parses_full_uri() {
    let uri = RepoUri::parse("repo://github.com/sourcegraph/sourcegraph@3f2a9c/-/raw/client/web/src/index.ts")
        .expect("valid uri");
    assert_eq!(uri.repo_name, "github.com/sourcegraph/sourcegraph");
    assert_eq!(uri.revision.as_deref(), Some("3f2a9c"));
    assert_eq!(uri.file_path.as_deref(), Some("client/web/src/index.ts"));
}

#[test]
fn revision_and_path_are_optional() {
    let bare = RepoUri::parse("repo://github.com/a/b").expect("valid uri");
    assert_eq!(bare.repo_name, "github.com/a/b");
    assert_eq!(bare.revision, None);
    assert_eq!(bare.file_path, None);

    let no_revision = RepoUri::parse("repo://github.com/a/b/-/raw/README.md").expect("valid uri");
    assert_eq!(no_revision.repo_name, "github.com/a/b");
    assert_eq!(no_revision.revision, None);
    assert_eq!(no_revision.file_path.as_deref(), Some("README.md"));
}

#[test]
fn branch_names_may_contain_slashes() {
    let uri = RepoUri::parse("repo://github.com/a/b@feature/blame/-/raw/src/lib.rs").expect("valid uri");
    assert_eq!(uri.revision.as_deref(), Some("feature/blame"));
    assert_eq!(uri.file_path.as_deref(), Some("src/lib.rs"));
}

#[test]
fn rejects_other_schemes() {
    assert!(RepoUri::parse("git://github.com/a/b?rev#path").is_err());
    assert!(RepoUri::parse("repo://").is_err());
}

#[test]
fn blob_uri_round_trips() {
    let blob = BlobInfo {
        repo_name: "github.com/a/b".into(),
        revision: "main".into(),
        commit_id: "deadbeef".into(),
        file_path: "src/main.rs".into(),
        content: String::new(),
        lsif: None,
    };
    let uri = RepoUri::for_blob(&blob);
    let text = uri.to_string();
    assert_eq!(text, "repo://github.com/a/b@deadbeef/-/raw/src/main.rs");
    let parsed = RepoUri::parse(&text).expect("formatted uri parses");
    assert_eq!(parsed.repo_name, blob.repo_name);
    assert_eq!(parsed.revision.as_deref(), Some("deadbeef"));
    assert_eq!(parsed.file_path.as_deref(), Some("src/main.rs"));
}
