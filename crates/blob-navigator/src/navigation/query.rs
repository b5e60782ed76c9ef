use crate::{
    ide::{Position, ScreenPoint},
    occurrence::{HighlightIndex, Occurrence, is_interactive},
};

/// Maps between screen coordinates and document positions. Implemented by
/// the hosting text surface.
pub trait CoordinateMapper: Send + Sync {
    /// Document position under `point`, or `None` when nothing is there
    /// (past the end of a line, outside the content area).
    fn position_at_coords(
        &self,
        point: ScreenPoint,
    ) -> Option<Position>;

    fn coords_at_position(
        &self,
        position: Position,
    ) -> Option<ScreenPoint>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Interactive occurrence on `line` closest to `position` among those
/// accepted by `include`.
///
/// Ties go to the occurrence that comes first in the index.
pub fn closest_occurrence<'a>(
    index: &'a HighlightIndex,
    line: u32,
    position: Position,
    include: impl Fn(&Occurrence) -> bool,
) -> Option<&'a Occurrence> {
    index
        .occurrences_on_line(line)
        .filter(|occurrence| is_interactive(occurrence) && include(occurrence))
        .min_by_key(|occurrence| occurrence.range.character_distance(position))
}

/// Next interactive occurrence when moving from `position` in `direction`.
///
/// Left and right stay on the current line and only consider occurrences
/// starting strictly before or after `position`. Up and down scan lines
/// outward from the current one (excluding it) and stop at the first line
/// that has an interactive occurrence. Reaching either end of the document
/// yields `None`.
pub fn occurrence_in_direction(
    index: &HighlightIndex,
    position: Position,
    direction: Direction,
) -> Option<&Occurrence> {
    let character = position.character;
    match direction {
        Direction::Left => {
            closest_occurrence(index, position.line, position, |occurrence| occurrence.range.start.character < character)
        },
        Direction::Right => {
            closest_occurrence(index, position.line, position, |occurrence| occurrence.range.start.character > character)
        },
        Direction::Up => (0..position.line).rev().find_map(|line| closest_occurrence(index, line, position, |_| true)),
        Direction::Down => {
            let last = index.line_count() as u32;
            (position.line.saturating_add(1)..last).find_map(|line| closest_occurrence(index, line, position, |_| true))
        },
    }
}

/// Occurrence under the pointer, together with the document position it maps to.
pub fn occurrence_at_screen_coordinates<'a>(
    index: &'a HighlightIndex,
    mapper: &dyn CoordinateMapper,
    point: ScreenPoint,
) -> Option<(&'a Occurrence, Position)> {
    let position = mapper.position_at_coords(point)?;
    index.occurrence_at(position).map(|occurrence| (occurrence, position))
}

#[cfg(test)]
#[path = "../../tests/src/navigation/query_tests.rs"]
mod tests;
