//! The blob view: one displayed document, its input handling and the
//! effects it asks the host to perform.

pub(crate) mod blob_view;
pub(crate) mod host;
pub(crate) mod session;

pub use blob_view::BlobView;
pub use host::{ContextMenu, ContextMenuItem, NavigationHost, Notice};
pub use session::{DocumentSession, ViewerServices};
