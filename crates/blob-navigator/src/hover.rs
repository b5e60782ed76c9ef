//! Hover tooltips for interactive occurrences.

use std::sync::Arc;

use tracing::debug;

use crate::{
    codeintel::{CodeIntelClient, MarkupContent, PositionParams, RemoteLookup},
    document::BlobInfo,
    ide::{Position, Range},
    occurrence::Occurrence,
    uri::RepoUri,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HoverTooltip {
    pub range: Range,
    pub contents: Vec<MarkupContent>,
}

pub struct HoverResolver {
    document_uri: String,
    client: Arc<dyn CodeIntelClient>,
}

impl HoverResolver {
    pub fn new(
        blob: &BlobInfo,
        client: Arc<dyn CodeIntelClient>,
    ) -> Self {
        Self {
            document_uri: RepoUri::for_blob(blob).to_string(),
            client,
        }
    }

    /// Tooltip for `occurrence` at `position`. Non-interactive occurrences,
    /// empty or still-loading answers and failures all yield `None`.
    pub async fn hover(
        &self,
        occurrence: &Occurrence,
        position: Position,
    ) -> Option<HoverTooltip> {
        if !occurrence.is_interactive() {
            return None;
        }

        let raw = match self.client.hover(PositionParams::new(self.document_uri.clone(), position)).await {
            Ok(raw) => raw,
            Err(error) => {
                debug!("[hover] {}:{} failed: {error}", position.line, position.character);
                return None;
            },
        };

        match RemoteLookup::from(raw) {
            RemoteLookup::Found(hover) => Some(HoverTooltip {
                range: hover.range.unwrap_or(occurrence.range),
                contents: hover.contents,
            }),
            RemoteLookup::Loading | RemoteLookup::NotFound => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src/hover_tests.rs"]
mod tests;
