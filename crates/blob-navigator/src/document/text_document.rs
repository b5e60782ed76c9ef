use crate::ide::Position;

/// Read-only text of the displayed blob with a precomputed line table.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    /// Byte offset of the first character of every line.
    line_offsets: Vec<usize>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_offsets = Self::compute_line_offsets(&text);
        Self {
            text,
            line_offsets,
        }
    }

    /// Number of lines in the document. An empty document has one empty line.
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Return the text of a 0-based line without its line terminator.
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line)?;
        let end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());
        let slice = &self.text[start..end];
        Some(slice.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Convert a byte offset to a `Position`. Offsets past the end clamp to the end.
    pub fn position_of(
        &self,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_at(offset);
        let line_start = self.line_offsets[line as usize];
        let character = self.text.get(line_start..offset).map_or(0, |prefix| prefix.encode_utf16().count() as u32);
        Position::new(line, character)
    }

    /// 0-based line containing `offset`.
    pub fn line_at(
        &self,
        offset: usize,
    ) -> u32 {
        let offset = offset.min(self.text.len());
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        };
        line as u32
    }

    fn compute_line_offsets(text: &str) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(text.len() / 40 + 1);
        offsets.push(0);
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                offsets.push(i + 1);
            }
        }
        offsets
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
