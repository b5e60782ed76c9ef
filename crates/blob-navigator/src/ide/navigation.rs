use serde::{Deserialize, Serialize};

/// Weight of one line of vertical distance in [`Range::character_distance`].
///
/// Any same-line candidate must rank before any candidate on another line,
/// so a line step outweighs the widest possible character delta.
const LINE_DISTANCE_WEIGHT: u64 = 1 << 32;

/// Zero-based document position. `character` counts UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(
        line: u32,
        character: u32,
    ) -> Self {
        Self {
            line,
            character,
        }
    }
}

/// Half-open document range: `start` is included, `end` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(
        start: Position,
        end: Position,
    ) -> Self {
        Self {
            start,
            end,
        }
    }

    pub const fn from_numbers(
        start_line: u32,
        start_character: u32,
        end_line: u32,
        end_character: u32,
    ) -> Self {
        Self::new(Position::new(start_line, start_character), Position::new(end_line, end_character))
    }

    pub fn contains(
        &self,
        position: Position,
    ) -> bool {
        self.start <= position && position < self.end
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// True when the range lies entirely within `first..=last` (zero-based lines).
    pub fn within_lines(
        &self,
        first: u32,
        last: u32,
    ) -> bool {
        self.start.line >= first && self.end.line <= last
    }

    /// Distance from the start of this range to `position`, used to rank
    /// navigation candidates. Lower is closer.
    pub fn character_distance(
        &self,
        position: Position,
    ) -> u64 {
        let line_delta = u64::from(self.start.line.abs_diff(position.line));
        let character_delta = u64::from(self.start.character.abs_diff(position.character));
        line_delta * LINE_DISTANCE_WEIGHT + character_delta
    }
}

/// A definition or reference location reported by the code-intelligence service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub uri: String,
    #[serde(default)]
    pub range: Option<Range>,
}

impl Location {
    pub fn new(
        uri: impl Into<String>,
        range: Option<Range>,
    ) -> Self {
        Self {
            uri: uri.into(),
            range,
        }
    }
}

/// Pointer coordinates in the hosting surface's screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/ide/navigation_tests.rs"]
mod tests;
