use super::*;

#[test]
fn line_table_counts_trailing_empty_line() {
    let doc = Document::new("fn main() {}\n");
    assert_eq!(doc.line_count(), 2);
    assert_eq!(doc.line_text(0), Some("fn main() {}"));
    assert_eq!(doc.line_text(1), Some(""));
    assert_eq!(doc.line_text(2), None);
}

#[test]
fn crlf_terminators_are_stripped() {
    let doc = Document::new("a\r\nbc\r\n");
    assert_eq!(doc.line_text(0), Some("a"));
    assert_eq!(doc.line_text(1), Some("bc"));
}

#[test]
fn offsets_map_to_positions() {
    let doc = Document::new("let a = 1;\nlet bb = 2;\n");
    assert_eq!(doc.position_of(0), Position::new(0, 0));
    assert_eq!(doc.position_of(15), Position::new(1, 4));
    assert_eq!(doc.position_of(11), Position::new(1, 0));
}

#[test]
fn utf16_characters_are_counted_in_code_units() {
    let text = "x = \"😀\" + y\n";
    let doc = Document::new(text);
    // The emoji is two UTF-16 code units and four UTF-8 bytes.
    let y = text.find('y').expect("y is present");
    assert_eq!(y, 13);
    assert_eq!(doc.position_of(y), Position::new(0, 11));
}

#[test]
fn offsets_past_the_end_clamp() {
    let doc = Document::new("ab\ncd");
    assert_eq!(doc.position_of(99), Position::new(1, 2));
}

#[test]
fn line_at_maps_offsets_to_lines() {
    let doc = Document::new("one\ntwo\nthree");
    assert_eq!(doc.line_at(0), 0);
    assert_eq!(doc.line_at(3), 0);
    assert_eq!(doc.line_at(4), 1);
    assert_eq!(doc.line_at(100), 2);
}
