use std::fmt;

use crate::ide::Range;

/// Transient message shown next to the occurrence that triggered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    NoDefinition,
    AtDefinition,
    ResolutionFailed,
}

impl NoticeKind {
    pub fn message(self) -> &'static str {
        match self {
            NoticeKind::NoDefinition => "No definition found",
            NoticeKind::AtDefinition => "You are at the definition",
            NoticeKind::ResolutionFailed => "Failed to resolve definition",
        }
    }
}

/// Where a single definition leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationTarget {
    /// Pretty blob URL pushed onto the history stack.
    pub url: String,
    /// Set when the target lies in the displayed document, so the view can
    /// move its own selection instead of waiting for a page load.
    pub selection: Option<Range>,
}

/// Replayable outcome of a definition lookup. Producing one has no side
/// effects; the view performs it only on an explicit click or Enter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavigationAction {
    /// The service was still indexing. Nothing happens and the lookup is
    /// retried on the next gesture.
    Deferred,
    Notice(NoticeKind),
    Navigate(NavigationTarget),
    /// Several candidates: open the definitions panel instead of picking one.
    ShowDefinitions {
        url: String,
        count: usize,
    },
}

impl NavigationAction {
    pub fn is_navigation(&self) -> bool {
        matches!(self, NavigationAction::Navigate(_) | NavigationAction::ShowDefinitions { .. })
    }
}

impl fmt::Display for NavigationAction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            NavigationAction::Deferred => f.write_str("deferred (still loading)"),
            NavigationAction::Notice(kind) => write!(f, "notice: {}", kind.message()),
            NavigationAction::Navigate(target) => match target.selection {
                Some(range) => write!(
                    f,
                    "navigate: {} (select {}:{}-{}:{})",
                    target.url, range.start.line, range.start.character, range.end.line, range.end.character
                ),
                None => write!(f, "navigate: {}", target.url),
            },
            NavigationAction::ShowDefinitions {
                url,
                count,
            } => write!(f, "show {count} definitions: {url}"),
        }
    }
}
