//! Token links and the viewport-driven prefetcher that resolves them.

pub(crate) mod manager;
pub(crate) mod token_links;

pub use manager::{PrefetchContext, Prefetcher, Viewport, definition_links, prefetch_viewport};
pub use token_links::{TokenLink, TokenLinkSet, TokenLinkUpdate};
