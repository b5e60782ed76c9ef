use std::time::Duration;

use crate::{definition::NoticeKind, ide::Range, navigation::Selection};

/// Transient message anchored at an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
    pub anchor: Range,
    pub duration: Duration,
}

impl Notice {
    pub fn new(
        kind: NoticeKind,
        anchor: Range,
        duration: Duration,
    ) -> Self {
        Self {
            kind,
            message: kind.message(),
            anchor,
            duration,
        }
    }
}

/// Effects the view asks its embedder to perform.
pub trait NavigationHost: Send + Sync {
    fn push_history(
        &self,
        url: &str,
    );

    fn go_back(&self);

    fn go_forward(&self);

    fn show_notice(
        &self,
        notice: Notice,
    );

    fn selection_changed(
        &self,
        selection: Selection,
    );

    fn pending_started(
        &self,
        id: u64,
        anchor: Range,
    );

    fn pending_finished(
        &self,
        id: u64,
    );

    /// Scroll `line` into view. Returns `false` when it is already visible
    /// and nothing moved.
    fn scroll_into_view(
        &self,
        line: u32,
    ) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextMenuItem {
    GoToDefinition,
    FindReferences {
        url: String,
    },
    /// Hint that Shift+right-click opens the browser's own menu.
    BrowserMenuHint,
}

impl ContextMenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            ContextMenuItem::GoToDefinition => "Go to definition",
            ContextMenuItem::FindReferences {
                ..
            } => "Find references",
            ContextMenuItem::BrowserMenuHint => "Browser context menu shift+right-click",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextMenu {
    pub anchor: Range,
    pub items: Vec<ContextMenuItem>,
}
