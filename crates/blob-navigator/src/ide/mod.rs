//! Editor-independent position, range and location types.

pub mod navigation;

pub use navigation::{Location, Position, Range, ScreenPoint};
