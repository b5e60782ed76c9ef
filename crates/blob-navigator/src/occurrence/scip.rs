//! Decoding of the precomputed occurrence document attached to a blob.
//!
//! The payload is the JSON rendering of a SCIP document:
//! `{"occurrences": [{"range": [line, start, end], "syntaxKind": 6}, ...]}`.
//! Three-element ranges are single-line; four-element ranges carry an
//! explicit end line.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    document::BlobInfo,
    ide::{Position, Range},
    occurrence::{Occurrence, SyntaxKind},
};

#[derive(Debug, Error)]
pub enum OccurrenceDecodeError {
    #[error("invalid occurrence JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("occurrence {index} has an invalid range {range:?}")]
    InvalidRange { index: usize, range: Vec<i64> },
}

#[derive(Debug, Deserialize)]
struct WireDocument {
    #[serde(default)]
    occurrences: Vec<WireOccurrence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOccurrence {
    range: Vec<i64>,
    #[serde(default)]
    syntax_kind: Option<i64>,
}

/// Decode a SCIP-style occurrence document, in wire order.
pub fn decode_occurrences(json: &str) -> Result<Vec<Occurrence>, OccurrenceDecodeError> {
    let document: WireDocument = serde_json::from_str(json)?;
    document
        .occurrences
        .into_iter()
        .enumerate()
        .map(|(index, wire)| {
            let range = decode_range(&wire.range).ok_or_else(|| OccurrenceDecodeError::InvalidRange {
                index,
                range: wire.range.clone(),
            })?;
            let kind = wire.syntax_kind.and_then(SyntaxKind::from_scip);
            Ok(Occurrence::new(range, kind))
        })
        .collect()
}

/// Occurrences for `blob`; a blob without an occurrence document has none.
pub fn occurrences_from_blob(blob: &BlobInfo) -> Result<Vec<Occurrence>, OccurrenceDecodeError> {
    match blob.lsif.as_deref() {
        Some(json) if !json.trim().is_empty() => decode_occurrences(json),
        _ => {
            debug!("[occurrences] no occurrence document for {}", blob.file_path);
            Ok(Vec::new())
        },
    }
}

fn decode_range(raw: &[i64]) -> Option<Range> {
    let to_u32 = |value: i64| u32::try_from(value).ok();
    let range = match *raw {
        [line, start, end] => {
            let line = to_u32(line)?;
            Range::new(Position::new(line, to_u32(start)?), Position::new(line, to_u32(end)?))
        },
        [start_line, start, end_line, end] => Range::new(
            Position::new(to_u32(start_line)?, to_u32(start)?),
            Position::new(to_u32(end_line)?, to_u32(end)?),
        ),
        _ => return None,
    };
    (range.start <= range.end).then_some(range)
}

#[cfg(test)]
#[path = "../../tests/src/occurrence/scip_tests.rs"]
mod tests;
