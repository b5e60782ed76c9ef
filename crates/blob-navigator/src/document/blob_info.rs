use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the viewer knows about the blob it displays.
///
/// `revision` is the label the user navigated with (branch, tag or empty for
/// the default branch); `commit_id` is the resolved commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobInfo {
    pub repo_name: String,
    #[serde(default)]
    pub revision: String,
    #[serde(rename = "commitID")]
    pub commit_id: String,
    pub file_path: String,
    #[serde(default)]
    pub content: String,
    /// Precomputed occurrence document (SCIP-style JSON), if code intelligence is available.
    #[serde(default)]
    pub lsif: Option<String>,
}

#[derive(Debug, Error)]
pub enum BlobInfoError {
    #[error("failed to read blob file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid blob JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl BlobInfo {
    pub fn from_json(json: &str) -> Result<Self, BlobInfoError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, BlobInfoError> {
        let json = std::fs::read_to_string(path).map_err(|source| BlobInfoError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// True when a location in `repo_name` at `commit_id` points into the same
    /// snapshot this blob was loaded from.
    pub fn is_same_snapshot(
        &self,
        repo_name: &str,
        commit_id: &str,
    ) -> bool {
        self.repo_name == repo_name && self.commit_id == commit_id
    }
}
