//! Document URIs understood by the code-intelligence service and the pretty
//! blob URLs the viewer navigates to.

pub(crate) mod blob_url;
pub(crate) mod repo_uri;

pub use blob_url::{BlobUrl, UrlPosition, ViewState, references_link};
pub use repo_uri::{RepoUri, RepoUriError};
