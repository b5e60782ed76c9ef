use crate::{ide::Range, occurrence::SyntaxKind};

/// A classified range of the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub range: Range,
    pub kind: Option<SyntaxKind>,
}

impl Occurrence {
    pub const fn new(
        range: Range,
        kind: Option<SyntaxKind>,
    ) -> Self {
        Self {
            range,
            kind,
        }
    }

    pub fn key(&self) -> OccurrenceKey {
        OccurrenceKey {
            range: self.range,
            kind: self.kind,
        }
    }

    pub fn is_interactive(&self) -> bool {
        super::is_interactive(self)
    }
}

/// Value identity of an occurrence.
///
/// Two occurrences from different index builds with the same range and kind
/// share a key, so per-occurrence caches survive index rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccurrenceKey {
    pub range: Range,
    pub kind: Option<SyntaxKind>,
}
