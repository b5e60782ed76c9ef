use tracing::warn;

use crate::{
    ide::Position,
    occurrence::{Occurrence, is_interactive},
};

/// Per-line lookup table over an immutable, sorted occurrence array.
///
/// `line_index[n]` is the position in `occurrences` of the first occurrence
/// that starts on line `n`; all occurrences of that line follow contiguously.
/// The table is rebuilt wholesale when the document changes, never patched.
#[derive(Debug, Clone, Default)]
pub struct HighlightIndex {
    occurrences: Vec<Occurrence>,
    line_index: Vec<Option<usize>>,
}

impl HighlightIndex {
    /// Build the table in one pass. Input is expected to be sorted by start
    /// position; unsorted input is stably sorted first, so occurrences that
    /// start at the same position keep their input order.
    ///
    /// Occurrences starting at or past `line_count` are dropped.
    pub fn new(
        mut occurrences: Vec<Occurrence>,
        line_count: usize,
    ) -> Self {
        let before = occurrences.len();
        occurrences.retain(|occurrence| (occurrence.range.start.line as usize) < line_count);
        if occurrences.len() < before {
            warn!(
                "[occurrences] dropping {} occurrences outside a {line_count}-line document",
                before - occurrences.len()
            );
        }

        if !occurrences.is_sorted_by_key(|occurrence| occurrence.range.start) {
            warn!("[occurrences] input is not sorted by start position, sorting {} entries", occurrences.len());
            occurrences.sort_by_key(|occurrence| occurrence.range.start);
        }

        let mut line_index = vec![None; line_count];
        for (index, occurrence) in occurrences.iter().enumerate() {
            let slot = &mut line_index[occurrence.range.start.line as usize];
            if slot.is_none() {
                *slot = Some(index);
            }
        }

        Self {
            occurrences,
            line_index,
        }
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Number of lines the table covers.
    pub fn line_count(&self) -> usize {
        self.line_index.len()
    }

    /// Index of the first occurrence starting on `line`, if any.
    pub fn first_on_line(
        &self,
        line: u32,
    ) -> Option<usize> {
        self.line_index.get(line as usize).copied().flatten()
    }

    /// Occurrences starting on `line`, in ascending start order.
    ///
    /// The returned iterator is cheap to clone, so callers can restart a scan.
    pub fn occurrences_on_line(
        &self,
        line: u32,
    ) -> OccurrencesOnLine<'_> {
        OccurrencesOnLine {
            occurrences: &self.occurrences,
            next: self.first_on_line(line).unwrap_or(self.occurrences.len()),
            line,
        }
    }

    /// First occurrence on `position.line` whose range contains `position`.
    pub fn occurrence_at(
        &self,
        position: Position,
    ) -> Option<&Occurrence> {
        self.occurrences_on_line(position.line).find(|occurrence| occurrence.range.contains(position))
    }

    pub fn interactive_occurrences(&self) -> impl Iterator<Item = &Occurrence> + '_ {
        self.occurrences.iter().filter(|occurrence| is_interactive(occurrence))
    }
}

/// Forward scan over the occurrences of one line.
#[derive(Debug, Clone)]
pub struct OccurrencesOnLine<'a> {
    occurrences: &'a [Occurrence],
    next: usize,
    line: u32,
}

impl<'a> Iterator for OccurrencesOnLine<'a> {
    type Item = &'a Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        let occurrence = self.occurrences.get(self.next)?;
        if occurrence.range.start.line != self.line {
            self.next = self.occurrences.len();
            return None;
        }
        self.next += 1;
        Some(occurrence)
    }
}

#[cfg(test)]
#[path = "../../tests/src/occurrence/index_tests.rs"]
mod tests;
