//! Occurrence table for one document: wire decoding, the per-line
//! [`HighlightIndex`] and the interactivity classifier.

pub(crate) mod index;
pub(crate) mod kind;
pub(crate) mod model;
pub(crate) mod scip;

pub use index::{HighlightIndex, OccurrencesOnLine};
pub use kind::{INTERACTIVE_KINDS, SyntaxKind, is_interactive};
pub use model::{Occurrence, OccurrenceKey};
pub use scip::{OccurrenceDecodeError, decode_occurrences, occurrences_from_blob};
