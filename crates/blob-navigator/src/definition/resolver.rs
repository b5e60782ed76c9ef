use tracing::warn;

use crate::{
    codeintel::RemoteLookup,
    definition::{NavigationAction, NavigationTarget, NoticeKind},
    document::BlobInfo,
    ide::{Location, Position},
    uri::{BlobUrl, RepoUri, UrlPosition, ViewState},
};

/// Decide what a definition lookup for `origin` in `blob` should do.
pub fn resolve_definition(
    blob: &BlobInfo,
    origin: Position,
    lookup: RemoteLookup<Vec<Location>>,
) -> NavigationAction {
    let locations = match lookup {
        RemoteLookup::Loading => return NavigationAction::Deferred,
        RemoteLookup::NotFound => return NavigationAction::Notice(NoticeKind::NoDefinition),
        RemoteLookup::Found(locations) => locations,
    };

    match locations.as_slice() {
        [] => NavigationAction::Notice(NoticeKind::NoDefinition),
        [location] => resolve_single(blob, origin, location),
        many => NavigationAction::ShowDefinitions {
            url: definition_panel_url(blob, origin),
            count: many.len(),
        },
    }
}

fn resolve_single(
    blob: &BlobInfo,
    origin: Position,
    location: &Location,
) -> NavigationAction {
    let target = match RepoUri::parse(&location.uri) {
        Ok(target) => target,
        Err(error) => {
            warn!("[goto-def] unusable definition location: {error}");
            return NavigationAction::Notice(NoticeKind::ResolutionFailed);
        },
    };

    let (Some(file_path), Some(range)) = (target.file_path.as_deref(), location.range) else {
        return NavigationAction::ShowDefinitions {
            url: definition_panel_url(blob, origin),
            count: 1,
        };
    };

    let target_revision = target.revision.as_deref().unwrap_or_default();
    let same_file = target.repo_name == blob.repo_name && file_path == blob.file_path;
    let same_snapshot = blob.is_same_snapshot(&target.repo_name, target_revision);
    let displayed_revision =
        same_file && (target.revision.is_none() || same_snapshot || target_revision == blob.revision);

    if displayed_revision && range.contains(origin) {
        return NavigationAction::Notice(NoticeKind::AtDefinition);
    }

    // Keep the branch or tag label in the URL when the target lives in the
    // snapshot being viewed.
    let revision = if same_snapshot {
        blob.revision.as_str()
    } else {
        target_revision
    };
    let url = BlobUrl::new(&target.repo_name, revision, file_path).at(UrlPosition::from_position(range.start));

    NavigationAction::Navigate(NavigationTarget {
        url: url.to_string(),
        selection: displayed_revision.then_some(range),
    })
}

/// URL of the current blob with the definitions panel open at `origin`.
pub fn definition_panel_url(
    blob: &BlobInfo,
    origin: Position,
) -> String {
    BlobUrl::new(&blob.repo_name, &blob.revision, &blob.file_path)
        .at(UrlPosition::from_position(origin))
        .with_view_state(ViewState::Definition)
        .to_string()
}

#[cfg(test)]
#[path = "../../tests/src/definition/resolver_tests.rs"]
mod tests;
