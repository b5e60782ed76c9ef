use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::{
    blame::BlameHunk,
    decorations::{
        BlameWidget, CLICKABLE_CLASS, DecorationSet, HIGHLIGHTED_LINE_CLASS, HoveredLine, LineClass, LinkMark,
        TOKEN_LINK_CLASS,
    },
    occurrence::HighlightIndex,
    prefetch::{TokenLink, Viewport},
};

/// Inputs of one render. Shared inputs are compared by pointer: a new
/// snapshot means a change.
#[derive(Clone)]
pub struct DecorationInputs {
    pub index: Arc<HighlightIndex>,
    pub links: Arc<Vec<TokenLink>>,
    pub blame: Option<Arc<Vec<BlameHunk>>>,
    pub hovered: HoveredLine,
    pub clickable: bool,
    pub viewport: Viewport,
}

struct Memo {
    inputs: DecorationInputs,
    window: Option<Viewport>,
    output: Arc<DecorationSet>,
}

impl Memo {
    fn reusable_for(
        &self,
        inputs: &DecorationInputs,
    ) -> bool {
        let same_blame = match (&self.inputs.blame, &inputs.blame) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        };
        let covers_viewport = match self.window {
            Some(window) => {
                window.first_line <= inputs.viewport.first_line
                    && inputs.viewport.last_line.min(last_line(&inputs.index)) <= window.last_line
            },
            None => true,
        };

        Arc::ptr_eq(&self.inputs.index, &inputs.index)
            && Arc::ptr_eq(&self.inputs.links, &inputs.links)
            && same_blame
            && self.inputs.hovered == inputs.hovered
            && self.inputs.clickable == inputs.clickable
            && covers_viewport
    }
}

fn last_line(index: &HighlightIndex) -> u32 {
    (index.line_count() as u32).saturating_sub(1)
}

/// Builds overlays for the viewport plus `overscan` lines on each side and
/// replays the last result while nothing it depends on has changed.
pub struct DecorationRenderer {
    overscan: u32,
    memo: Mutex<Option<Memo>>,
}

impl DecorationRenderer {
    pub fn new(overscan: u32) -> Self {
        Self {
            overscan,
            memo: Mutex::new(None),
        }
    }

    pub fn render(
        &self,
        inputs: DecorationInputs,
    ) -> Arc<DecorationSet> {
        let mut memo = self.memo.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(cached) = memo.as_ref()
            && cached.reusable_for(&inputs)
        {
            return Arc::clone(&cached.output);
        }

        let window = self.window_for(&inputs);
        let output = Arc::new(build(&inputs, window));
        debug!(
            "[decorations] rebuilt {} marks, {} widgets for {:?}",
            output.marks.len(),
            output.widgets.len(),
            window
        );
        *memo = Some(Memo {
            inputs,
            window,
            output: Arc::clone(&output),
        });
        output
    }

    /// Forget the memo, forcing the next render to rebuild.
    pub fn invalidate(&self) {
        *self.memo.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    fn window_for(
        &self,
        inputs: &DecorationInputs,
    ) -> Option<Viewport> {
        if inputs.index.line_count() == 0 {
            return None;
        }
        let last = last_line(&inputs.index);
        let first_line = inputs.viewport.first_line.min(last).saturating_sub(self.overscan);
        let last_line = inputs.viewport.last_line.saturating_add(self.overscan).min(last);
        Some(Viewport::new(first_line, last_line))
    }
}

fn build(
    inputs: &DecorationInputs,
    window: Option<Viewport>,
) -> DecorationSet {
    let Some(window) = window else {
        return DecorationSet::default();
    };
    let in_window = |line: u32| line >= window.first_line && line <= window.last_line;

    let marks = inputs
        .links
        .iter()
        .filter(|link| link.range.within_lines(window.first_line, window.last_line))
        .filter_map(|link| {
            Some(LinkMark {
                range: link.range,
                href: link.url.clone()?,
                class: TOKEN_LINK_CLASS,
            })
        })
        .collect();

    let mut widgets: Vec<BlameWidget> = Vec::new();
    for hunk in inputs.blame.iter().flat_map(|hunks| hunks.iter()) {
        let line = hunk.data.first_line();
        if in_window(line) && widgets.iter().all(|widget| widget.line != line) {
            widgets.push(BlameWidget {
                line,
                hunk: hunk.clone(),
            });
        }
    }
    widgets.sort_by_key(|widget| widget.line);

    let hovered: Vec<LineClass> = inputs
        .hovered
        .line()
        .filter(|line| in_window(*line))
        .map(|line| LineClass {
            line,
            class: HIGHLIGHTED_LINE_CLASS,
        })
        .into_iter()
        .collect();

    DecorationSet {
        window: Some(window),
        marks,
        widgets,
        line_classes: hovered.clone(),
        gutter_classes: hovered,
        content_classes: if inputs.clickable { vec![CLICKABLE_CLASS] } else { Vec::new() },
    }
}

#[cfg(test)]
#[path = "../../tests/src/decorations/renderer_tests.rs"]
mod tests;
