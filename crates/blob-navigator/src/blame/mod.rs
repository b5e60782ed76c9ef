//! Git blame annotations: wire types, display formatting and a per-file
//! fetch memo.

pub(crate) mod display;
pub(crate) mod hunk;
pub(crate) mod store;

pub use display::{BLAME_COLORS, format_date_for_blame, format_distance_strict, recency_color, truncate};
pub use hunk::{
    BlameAuthor, BlameCommit, BlameDisplayInfo, BlameHunk, BlameHunkData, BlamePerson, BlameUser, display_hunks,
};
pub use store::{BlameKey, BlameSource, BlameStore, SharedHunks};
