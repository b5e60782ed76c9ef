pub mod blame;
pub mod codeintel;
pub mod config;
pub mod decorations;
pub mod definition;
pub mod document;
pub mod focus;
pub mod hover;
pub mod ide;
pub mod navigation;
pub mod occurrence;
pub mod prefetch;
pub mod progress;
pub mod uri;
pub mod view;

pub use blame::{BlameHunk, BlameKey, BlameSource, BlameStore};
pub use codeintel::{CodeIntelClient, CodeIntelError, DefinitionSource, RemoteLookup, StaticCodeIntel};
pub use config::ViewerSettings;
pub use decorations::{DecorationRenderer, DecorationSet, HoveredLine};
pub use definition::{DefinitionPipeline, NavigationAction, NoticeKind};
pub use document::{BlobInfo, Document};
pub use focus::FocusRouter;
pub use hover::{HoverResolver, HoverTooltip};
pub use ide::{Location, Position, Range, ScreenPoint};
pub use navigation::{CoordinateMapper, Direction, KeyEvent, Modifiers, Selection};
pub use occurrence::{HighlightIndex, Occurrence, SyntaxKind};
pub use prefetch::{Prefetcher, TokenLink, TokenLinkSet, Viewport};
pub use progress::PendingIndicator;
pub use uri::{BlobUrl, RepoUri};
pub use view::{BlobView, DocumentSession, NavigationHost, Notice, ViewerServices};
