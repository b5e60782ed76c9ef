/// Which line the pointer is over, as reported by blame widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HoveredLine {
    #[default]
    None,
    Selected(u32),
}

impl HoveredLine {
    pub fn enter(
        self,
        line: u32,
    ) -> Self {
        HoveredLine::Selected(line)
    }

    /// Leaving a line only clears the highlight if that line is still the
    /// selected one; a late leave from an older line is ignored.
    pub fn leave(
        self,
        line: u32,
    ) -> Self {
        match self {
            HoveredLine::Selected(current) if current == line => HoveredLine::None,
            other => other,
        }
    }

    pub fn line(self) -> Option<u32> {
        match self {
            HoveredLine::None => None,
            HoveredLine::Selected(line) => Some(line),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/decorations/hover_line_tests.rs"]
mod tests;
