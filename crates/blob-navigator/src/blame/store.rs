use std::sync::{Arc, Weak};

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use tracing::{debug, warn};

use crate::{blame::BlameHunkData, codeintel::CodeIntelError, document::BlobInfo};

/// Identifies one blamed file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlameKey {
    pub repo_name: String,
    pub revision: String,
    pub file_path: String,
}

impl BlameKey {
    pub fn new(
        repo_name: impl Into<String>,
        revision: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            repo_name: repo_name.into(),
            revision: revision.into(),
            file_path: file_path.into(),
        }
    }

    pub fn for_blob(blob: &BlobInfo) -> Self {
        Self::new(&blob.repo_name, &blob.revision, &blob.file_path)
    }
}

#[async_trait]
pub trait BlameSource: Send + Sync {
    async fn blame_hunks(
        &self,
        key: &BlameKey,
    ) -> Result<Vec<BlameHunkData>, CodeIntelError>;
}

pub type SharedHunks = Shared<BoxFuture<'static, Result<Arc<Vec<BlameHunkData>>, CodeIntelError>>>;

type Entries = DashMap<BlameKey, SharedHunks>;

/// Fetches blame once per file and replays the result.
///
/// Concurrent callers for the same key share one request. A failed fetch is
/// forgotten once it completes, so the next caller retries.
#[derive(Clone)]
pub struct BlameStore {
    source: Arc<dyn BlameSource>,
    entries: Arc<Entries>,
}

impl BlameStore {
    pub fn new(source: Arc<dyn BlameSource>) -> Self {
        Self {
            source,
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn hunks(
        &self,
        key: BlameKey,
    ) -> SharedHunks {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let key = entry.key().clone();
                debug!("[blame] fetching {}@{} {}", key.repo_name, key.revision, key.file_path);
                let pending =
                    fetch(Arc::clone(&self.source), Arc::downgrade(&self.entries), key).boxed().shared();
                entry.insert(pending.clone());
                pending
            },
        }
    }

    pub fn is_memoized(
        &self,
        key: &BlameKey,
    ) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.value().peek().is_some_and(Result::is_ok))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

async fn fetch(
    source: Arc<dyn BlameSource>,
    entries: Weak<Entries>,
    key: BlameKey,
) -> Result<Arc<Vec<BlameHunkData>>, CodeIntelError> {
    match source.blame_hunks(&key).await {
        Ok(hunks) => Ok(Arc::new(hunks)),
        Err(error) => {
            warn!("[blame] fetch for {} failed: {error}", key.file_path);
            if let Some(entries) = entries.upgrade() {
                entries.remove(&key);
            }
            Err(error)
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src/blame/store_tests.rs"]
mod tests;
