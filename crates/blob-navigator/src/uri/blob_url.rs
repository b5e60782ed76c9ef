use std::fmt;

use url::Url;

use crate::ide::{Position, Range};

/// 1-based position as it appears in a blob URL (`?L12:5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UrlPosition {
    pub line: u32,
    pub character: Option<u32>,
}

impl UrlPosition {
    pub fn from_position(position: Position) -> Self {
        Self {
            line: position.line.saturating_add(1),
            character: Some(position.character.saturating_add(1)),
        }
    }

    pub fn line(line: u32) -> Self {
        Self {
            line: line.saturating_add(1),
            character: None,
        }
    }
}

impl fmt::Display for UrlPosition {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "L{}", self.line)?;
        if let Some(character) = self.character {
            write!(f, ":{character}")?;
        }
        Ok(())
    }
}

/// Panel the blob page opens on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    Definition,
    References,
}

impl ViewState {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewState::Definition => "def",
            ViewState::References => "references",
        }
    }
}

/// Pretty URL of a blob page:
/// `/{repo}[@{revision}]/-/blob/{path}[?L{line}[:{character}]][#tab={view}]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobUrl {
    pub repo_name: String,
    pub revision: String,
    pub file_path: String,
    pub position: Option<UrlPosition>,
    pub view_state: Option<ViewState>,
}

impl BlobUrl {
    pub fn new(
        repo_name: impl Into<String>,
        revision: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            repo_name: repo_name.into(),
            revision: revision.into(),
            file_path: file_path.into(),
            position: None,
            view_state: None,
        }
    }

    pub fn at(
        mut self,
        position: UrlPosition,
    ) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_view_state(
        mut self,
        view_state: ViewState,
    ) -> Self {
        self.view_state = Some(view_state);
        self
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&encode_path(&self.repo_name))?;
        if !self.revision.is_empty() {
            write!(f, "@{}", encode_path(&self.revision).trim_start_matches('/'))?;
        }
        write!(f, "/-/blob{}", encode_path(&self.file_path))?;
        if let Some(position) = self.position {
            write!(f, "?{position}")?;
        }
        if let Some(view_state) = self.view_state {
            write!(f, "#tab={}", view_state.as_str())?;
        }
        Ok(())
    }
}

/// Relative link opening the references panel for the occurrence at `range`.
pub fn references_link(range: Range) -> String {
    format!("?{}#tab={}", UrlPosition::from_position(range.start), ViewState::References.as_str())
}

/// Percent-encode `path` segment by segment, keeping the `/` separators.
/// The result always starts with `/`.
fn encode_path(path: &str) -> String {
    let Ok(mut base) = Url::parse("https://blob.invalid/") else {
        return format!("/{path}");
    };
    if let Ok(mut segments) = base.path_segments_mut() {
        segments.clear().extend(path.trim_start_matches('/').split('/'));
    }
    base.path().to_owned()
}

#[cfg(test)]
#[path = "../../tests/src/uri/blob_url_tests.rs"]
mod tests;
