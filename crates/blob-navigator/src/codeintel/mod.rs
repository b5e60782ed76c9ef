//! Contracts with the remote code-intelligence service.
//!
//! Remote answers arrive as loosely typed `{isLoading, result}` payloads.
//! They are converted exactly once into [`RemoteLookup`] at the resolution
//! boundary; nothing downstream inspects loading flags or empty results.

pub(crate) mod static_index;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ide::{Location, Position, Range};

pub use static_index::{StaticCodeIntel, StaticIndexError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodeIntelError {
    #[error("code intelligence transport failed: {0}")]
    Transport(String),
    #[error("code intelligence service returned error {code}: {message}")]
    Remote { code: i64, message: String },
    #[error("document view was disposed")]
    Disposed,
}

/// A position inside a document, as sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionParams {
    pub uri: String,
    pub position: Position,
}

impl PositionParams {
    pub fn new(
        uri: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            uri: uri.into(),
            position,
        }
    }
}

/// Raw service payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaybeLoadingResult<T> {
    pub is_loading: bool,
    pub result: T,
}

impl<T> MaybeLoadingResult<T> {
    pub fn loaded(result: T) -> Self {
        Self {
            is_loading: false,
            result,
        }
    }

    pub fn loading(result: T) -> Self {
        Self {
            is_loading: true,
            result,
        }
    }
}

/// Outcome of one remote lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteLookup<T> {
    Loading,
    Found(T),
    NotFound,
}

impl From<MaybeLoadingResult<Vec<Location>>> for RemoteLookup<Vec<Location>> {
    fn from(raw: MaybeLoadingResult<Vec<Location>>) -> Self {
        if raw.is_loading {
            return RemoteLookup::Loading;
        }
        if raw.result.is_empty() {
            return RemoteLookup::NotFound;
        }
        RemoteLookup::Found(raw.result)
    }
}

impl From<MaybeLoadingResult<Option<HoverContents>>> for RemoteLookup<HoverContents> {
    fn from(raw: MaybeLoadingResult<Option<HoverContents>>) -> Self {
        if raw.is_loading {
            return RemoteLookup::Loading;
        }
        match raw.result {
            Some(contents) if !contents.is_empty() => RemoteLookup::Found(contents),
            _ => RemoteLookup::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    #[serde(rename = "plaintext")]
    PlainText,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkupContent {
    pub kind: MarkupKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoverContents {
    pub contents: Vec<MarkupContent>,
    #[serde(default)]
    pub range: Option<Range>,
}

impl HoverContents {
    pub fn is_empty(&self) -> bool {
        self.contents.iter().all(|content| content.value.trim().is_empty())
    }
}

/// Per-position lookups against the code-intelligence service.
#[async_trait]
pub trait CodeIntelClient: Send + Sync {
    async fn definition(
        &self,
        params: PositionParams,
    ) -> Result<MaybeLoadingResult<Vec<Location>>, CodeIntelError>;

    async fn hover(
        &self,
        params: PositionParams,
    ) -> Result<MaybeLoadingResult<Option<HoverContents>>, CodeIntelError>;
}

/// Batched definition lookup for the ranges visible in a viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeDefinitionsRequest {
    pub repo_name: String,
    pub revision: String,
    pub file_path: String,
    pub ranges: Vec<Range>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionTarget {
    pub repository: String,
    pub commit: String,
    pub path: String,
    #[serde(default)]
    pub range: Option<Range>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDefinition {
    pub range: Range,
    #[serde(default)]
    pub definition: Option<DefinitionTarget>,
}

#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn definitions_for_ranges(
        &self,
        request: RangeDefinitionsRequest,
    ) -> Result<Vec<RangeDefinition>, CodeIntelError>;
}

#[cfg(test)]
#[path = "../../tests/src/codeintel/mod_tests.rs"]
mod tests;
