//! Spatial and directional queries over the occurrence table, plus the key
//! bindings and selection model that drive keyboard navigation.

pub(crate) mod keymap;
pub(crate) mod query;
pub(crate) mod selection;

pub use keymap::{Key, KeyCommand, KeyEvent, Modifiers, command_for};
pub use query::{
    CoordinateMapper, Direction, closest_occurrence, occurrence_at_screen_coordinates, occurrence_in_direction,
};
pub use selection::{Selection, scroll_candidates};
