pub(crate) mod blob_info;
pub(crate) mod text_document;

pub use blob_info::{BlobInfo, BlobInfoError};
pub use text_document::Document;
