use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::document::BlobInfo;

static REPO_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^repo://(?P<repo>[^@]+?)(?:@(?P<rev>[^@]+?))?(?:/-/raw/(?P<path>.+))?$")
        .expect("repository URI pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoUriError {
    #[error("not a repository URI: {0}")]
    Malformed(String),
}

/// `repo://{repoName}[@{revision}][/-/raw/{filePath}]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoUri {
    pub repo_name: String,
    pub revision: Option<String>,
    pub file_path: Option<String>,
}

impl RepoUri {
    pub fn parse(uri: &str) -> Result<Self, RepoUriError> {
        let captures = REPO_URI_RE.captures(uri).ok_or_else(|| RepoUriError::Malformed(uri.to_owned()))?;
        let repo_name = captures.name("repo").map(|m| m.as_str().to_owned()).unwrap_or_default();
        if repo_name.is_empty() {
            return Err(RepoUriError::Malformed(uri.to_owned()));
        }
        Ok(Self {
            repo_name,
            revision: captures.name("rev").map(|m| m.as_str().to_owned()),
            file_path: captures.name("path").map(|m| m.as_str().to_owned()),
        })
    }

    /// URI of the document shown for `blob`, pinned to its commit.
    pub fn for_blob(blob: &BlobInfo) -> Self {
        Self {
            repo_name: blob.repo_name.clone(),
            revision: Some(blob.commit_id.clone()).filter(|commit| !commit.is_empty()),
            file_path: Some(blob.file_path.clone()),
        }
    }
}

impl fmt::Display for RepoUri {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "repo://{}", self.repo_name)?;
        if let Some(revision) = &self.revision {
            write!(f, "@{revision}")?;
        }
        if let Some(path) = &self.file_path {
            write!(f, "/-/raw/{path}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src/uri/repo_uri_tests.rs"]
mod tests;
