use pretty_assertions::assert_eq;

use super::*;
use crate::{ide::Range, occurrence::SyntaxKind};

fn ident(
    line: u32,
    start: u32,
    end: u32,
) -> Occurrence {
    Occurrence::new(Range::from_numbers(line, start, line, end), Some(SyntaxKind::Identifier))
}

fn punct(
    line: u32,
    start: u32,
) -> Occurrence {
    Occurrence::new(Range::from_numbers(line, start, line, start + 1), Some(SyntaxKind::PunctuationDelimiter))
}

fn sample() -> HighlightIndex {
    HighlightIndex::new(vec![ident(0, 0, 3), punct(0, 3), ident(0, 5, 9), ident(2, 4, 6), ident(4, 0, 2)], 6)
}

#[test]
fn line_index_points_at_first_occurrence_of_each_line() {
    let index = sample();
    assert_eq!(index.line_count(), 6);
    assert_eq!(index.first_on_line(0), Some(0));
    assert_eq!(index.first_on_line(1), None);
    assert_eq!(index.first_on_line(2), Some(3));
    assert_eq!(index.first_on_line(4), Some(4));
    assert_eq!(index.first_on_line(5), None);
    assert_eq!(index.first_on_line(400), None);
}

#[test]
fn scanning_a_line_yields_exactly_its_occurrences_in_order() {
    let index = sample();
    for line in 0..index.line_count() as u32 {
        let scanned: Vec<Occurrence> = index.occurrences_on_line(line).copied().collect();
        let expected: Vec<Occurrence> =
            index.occurrences().iter().filter(|occurrence| occurrence.range.start.line == line).copied().collect();
        assert_eq!(scanned, expected, "line {line}");
        assert!(scanned.windows(2).all(|pair| pair[0].range.start.character <= pair[1].range.start.character));
    }
}

#[test]
fn line_scan_is_restartable() {
    let index = sample();
    let scan = index.occurrences_on_line(0);
    assert_eq!(scan.clone().count(), 3);
    assert_eq!(scan.count(), 3);
}

#[test]
fn unsorted_input_is_sorted_stably() {
    let first = ident(1, 2, 4);
    let twin = Occurrence::new(Range::from_numbers(1, 2, 1, 4), Some(SyntaxKind::IdentifierLocal));
    let index = HighlightIndex::new(vec![ident(3, 0, 1), first, twin, ident(0, 0, 1)], 4);
    let starts: Vec<u32> = index.occurrences().iter().map(|occurrence| occurrence.range.start.line).collect();
    assert_eq!(starts, vec![0, 1, 1, 3]);
    assert_eq!(index.occurrences()[1], first);
    assert_eq!(index.occurrences()[2], twin);
}

#[test]
fn occurrences_past_the_last_line_are_dropped() {
    let index = HighlightIndex::new(vec![ident(0, 0, 1), ident(1, 2, 3), ident(2, 0, 1), ident(u32::MAX, 0, 3)], 2);
    assert_eq!(index.line_count(), 2);
    assert_eq!(index.occurrences(), &[ident(0, 0, 1), ident(1, 2, 3)]);
    assert_eq!(index.first_on_line(2), None);
    assert_eq!(index.occurrence_at(Position::new(u32::MAX, 1)), None);
}

#[test]
fn huge_line_numbers_do_not_size_the_table() {
    let index = HighlightIndex::new(vec![ident(200_000_000, 0, 3)], 2);
    assert_eq!(index.line_count(), 2);
    assert!(index.is_empty());
}

#[test]
fn point_query_finds_containing_occurrence() {
    let index = sample();
    assert_eq!(index.occurrence_at(Position::new(0, 1)), Some(&ident(0, 0, 3)));
    assert_eq!(index.occurrence_at(Position::new(0, 3)), Some(&punct(0, 3)));
    assert_eq!(index.occurrence_at(Position::new(0, 4)), None);
    assert_eq!(index.occurrence_at(Position::new(0, 9)), None);
    assert_eq!(index.occurrence_at(Position::new(1, 0)), None);
    assert_eq!(index.occurrence_at(Position::new(77, 0)), None);
}

#[test]
fn point_query_has_no_false_positives_or_negatives() {
    let index = sample();
    for line in 0..6 {
        for character in 0..12 {
            let position = Position::new(line, character);
            let expected = index.occurrences().iter().find(|occurrence| occurrence.range.contains(position));
            assert_eq!(index.occurrence_at(position), expected, "{position:?}");
        }
    }
}

#[test]
fn equal_starts_resolve_to_first_in_index_order() {
    let outer = Occurrence::new(Range::from_numbers(0, 0, 0, 10), Some(SyntaxKind::IdentifierType));
    let inner = Occurrence::new(Range::from_numbers(0, 0, 0, 3), Some(SyntaxKind::Identifier));
    let index = HighlightIndex::new(vec![outer, inner], 1);
    assert_eq!(index.occurrence_at(Position::new(0, 1)), Some(&outer));
}

#[test]
fn interactive_filter_skips_punctuation() {
    let index = sample();
    assert_eq!(index.interactive_occurrences().count(), 4);
}
