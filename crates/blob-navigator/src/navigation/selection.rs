use crate::ide::{Position, Range};

/// Immutable snapshot of the viewer selection.
///
/// Updates produce a new snapshot; nothing mutates a published one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    range: Range,
}

impl Selection {
    pub const fn caret(position: Position) -> Self {
        Self {
            range: Range::new(position, position),
        }
    }

    pub const fn range(range: Range) -> Self {
        Self {
            range,
        }
    }

    pub fn head(&self) -> Position {
        self.range.start
    }

    pub fn as_range(&self) -> Range {
        self.range
    }
}

/// Lines to try scrolling into view after selecting `range`, in order:
/// two lines below the selection, then two lines above it.
pub fn scroll_candidates(
    range: Range,
    line_count: usize,
) -> [u32; 2] {
    let last = (line_count as u32).saturating_sub(1);
    let below = range.start.line.saturating_add(2).min(last);
    let above = range.start.line.saturating_sub(2);
    [below, above]
}
