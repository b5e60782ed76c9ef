use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    blame::{BlameHunkData, BlameKey, BlameSource},
    codeintel::{
        CodeIntelClient, CodeIntelError, DefinitionSource, DefinitionTarget, HoverContents, MaybeLoadingResult,
        PositionParams, RangeDefinition, RangeDefinitionsRequest,
    },
    ide::{Location, Range},
    uri::RepoUri,
};

#[derive(Debug, Error)]
pub enum StaticIndexError {
    #[error("failed to read code intelligence file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid code intelligence JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefinitionEntry {
    uri: String,
    range: Range,
    #[serde(default)]
    loading: bool,
    #[serde(default)]
    locations: Vec<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HoverEntry {
    uri: String,
    range: Range,
    contents: HoverContents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeDefinitionEntry {
    repo_name: String,
    file_path: String,
    range: Range,
    definition: DefinitionTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlameEntry {
    repo_name: String,
    #[serde(default)]
    revision: String,
    file_path: String,
    hunks: Vec<BlameHunkData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StaticIndexFile {
    definitions: Vec<DefinitionEntry>,
    hovers: Vec<HoverEntry>,
    range_definitions: Vec<RangeDefinitionEntry>,
    blame: Vec<BlameEntry>,
}

/// Code intelligence answered from a JSON file instead of a live service.
///
/// Position lookups match any entry whose `range` contains the requested
/// position in the requested document. Documents are compared by repository
/// and path only, so one table serves every revision of a file.
#[derive(Debug, Clone, Default)]
pub struct StaticCodeIntel {
    index: StaticIndexFile,
}

impl StaticCodeIntel {
    pub fn from_json(json: &str) -> Result<Self, StaticIndexError> {
        Ok(Self {
            index: serde_json::from_str(json)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, StaticIndexError> {
        let json = std::fs::read_to_string(path).map_err(|source| StaticIndexError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

fn same_document(
    left: &str,
    right: &str,
) -> bool {
    match (RepoUri::parse(left), RepoUri::parse(right)) {
        (Ok(left), Ok(right)) => left.repo_name == right.repo_name && left.file_path == right.file_path,
        _ => left == right,
    }
}

#[async_trait]
impl CodeIntelClient for StaticCodeIntel {
    async fn definition(
        &self,
        params: PositionParams,
    ) -> Result<MaybeLoadingResult<Vec<Location>>, CodeIntelError> {
        let entry = self
            .index
            .definitions
            .iter()
            .find(|entry| same_document(&entry.uri, &params.uri) && entry.range.contains(params.position));
        let Some(entry) = entry else {
            debug!("[codeintel] no static definition for {}:{:?}", params.uri, params.position);
            return Ok(MaybeLoadingResult::loaded(Vec::new()));
        };
        Ok(MaybeLoadingResult {
            is_loading: entry.loading,
            result: entry.locations.clone(),
        })
    }

    async fn hover(
        &self,
        params: PositionParams,
    ) -> Result<MaybeLoadingResult<Option<HoverContents>>, CodeIntelError> {
        let contents = self
            .index
            .hovers
            .iter()
            .find(|entry| same_document(&entry.uri, &params.uri) && entry.range.contains(params.position))
            .map(|entry| entry.contents.clone());
        Ok(MaybeLoadingResult::loaded(contents))
    }
}

#[async_trait]
impl DefinitionSource for StaticCodeIntel {
    async fn definitions_for_ranges(
        &self,
        request: RangeDefinitionsRequest,
    ) -> Result<Vec<RangeDefinition>, CodeIntelError> {
        let definitions = request
            .ranges
            .iter()
            .map(|range| {
                let definition = self
                    .index
                    .range_definitions
                    .iter()
                    .find(|entry| {
                        entry.repo_name == request.repo_name
                            && entry.file_path == request.file_path
                            && entry.range == *range
                    })
                    .map(|entry| entry.definition.clone());
                RangeDefinition {
                    range: *range,
                    definition,
                }
            })
            .collect();
        Ok(definitions)
    }
}

#[async_trait]
impl BlameSource for StaticCodeIntel {
    async fn blame_hunks(
        &self,
        key: &BlameKey,
    ) -> Result<Vec<BlameHunkData>, CodeIntelError> {
        let hunks = self
            .index
            .blame
            .iter()
            .find(|entry| {
                entry.repo_name == key.repo_name
                    && entry.file_path == key.file_path
                    && (entry.revision.is_empty() || entry.revision == key.revision)
            })
            .map(|entry| entry.hunks.clone())
            .unwrap_or_default();
        Ok(hunks)
    }
}

#[cfg(test)]
#[path = "../../tests/src/codeintel/static_index_tests.rs"]
mod tests;
