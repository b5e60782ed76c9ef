//! Overlays for the hosting text surface: token links, blame widgets and the
//! hovered-line highlight.

pub(crate) mod hover_line;
pub(crate) mod renderer;
pub(crate) mod set;

pub use hover_line::HoveredLine;
pub use renderer::{DecorationInputs, DecorationRenderer};
pub use set::{
    BlameWidget, CLICKABLE_CLASS, DecorationSet, HIGHLIGHTED_LINE_CLASS, LineClass, LinkMark, TOKEN_LINK_CLASS,
};
