//! Go-to-definition: turns a (document, position) pair into a
//! [`NavigationAction`], coalescing remote lookups per occurrence.

pub(crate) mod action;
pub(crate) mod cache;
pub(crate) mod perf;
pub(crate) mod pipeline;
pub(crate) mod resolver;

pub use action::{NavigationAction, NavigationTarget, NoticeKind};
pub use cache::{DefinitionCache, DefinitionState, PendingAction, Resolution};
pub use perf::{DefinitionPerf, DefinitionPerfSnapshot};
pub use pipeline::DefinitionPipeline;
pub use resolver::{definition_panel_url, resolve_definition};
