use std::fmt;

use crate::{blame::BlameHunk, ide::Range, prefetch::Viewport};

pub const TOKEN_LINK_CLASS: &str = "token-link";
pub const HIGHLIGHTED_LINE_CLASS: &str = "highlighted-line";
pub const CLICKABLE_CLASS: &str = "clickable";

/// Anchor-like span over a resolved token link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkMark {
    pub range: Range,
    pub href: String,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineClass {
    pub line: u32,
    pub class: &'static str,
}

/// Blame annotation placed at the start of a hunk's first line.
///
/// Equality is by content: two widgets built from the same hunk compare
/// equal, so the host can keep the mounted one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlameWidget {
    pub line: u32,
    pub hunk: BlameHunk,
}

/// Everything drawn over one window of lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecorationSet {
    pub window: Option<Viewport>,
    pub marks: Vec<LinkMark>,
    pub widgets: Vec<BlameWidget>,
    pub line_classes: Vec<LineClass>,
    pub gutter_classes: Vec<LineClass>,
    pub content_classes: Vec<&'static str>,
}

impl DecorationSet {
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
            && self.widgets.is_empty()
            && self.line_classes.is_empty()
            && self.gutter_classes.is_empty()
            && self.content_classes.is_empty()
    }
}

impl fmt::Display for DecorationSet {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.window {
            Some(window) => writeln!(f, "window {}..={}", window.first_line, window.last_line)?,
            None => writeln!(f, "window empty")?,
        }
        if !self.content_classes.is_empty() {
            writeln!(f, "content .{}", self.content_classes.join(" ."))?;
        }
        for mark in &self.marks {
            let Range {
                start,
                end,
            } = mark.range;
            writeln!(
                f,
                "mark {}:{}-{}:{} .{} -> {}",
                start.line, start.character, end.line, end.character, mark.class, mark.href
            )?;
        }
        for widget in &self.widgets {
            let display = &widget.hunk.display;
            writeln!(
                f,
                "blame L{} {}{} {} \"{}\" {}",
                widget.line + 1,
                display.username,
                display.display_name,
                display.date_string,
                display.message,
                display.recency_color
            )?;
        }
        for class in &self.line_classes {
            writeln!(f, "line L{} .{}", class.line + 1, class.class)?;
        }
        for class in &self.gutter_classes {
            writeln!(f, "gutter L{} .{}", class.line + 1, class.class)?;
        }
        Ok(())
    }
}
