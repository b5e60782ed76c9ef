use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tokio::sync::watch;
use tracing::debug;

use crate::{
    ide::{Position, Range},
    occurrence::HighlightIndex,
    uri::references_link,
};

/// Navigation URL attached to one occurrence range. `url` is `None` while
/// the link is unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenLink {
    pub range: Range,
    pub url: Option<String>,
}

impl TokenLink {
    pub fn new(
        range: Range,
        url: Option<String>,
    ) -> Self {
        Self {
            range,
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLinkUpdate {
    /// Replace the URL of every existing link whose range equals an update's
    /// range. Links not named in the update are left alone.
    Merge(Vec<TokenLink>),
    Clear,
}

/// The links of one document, published as copy-on-write snapshots.
///
/// Readers hold an `Arc` of the snapshot they rendered from; an update that
/// changes nothing keeps the current snapshot, so pointer equality means
/// "nothing changed".
pub struct TokenLinkSet {
    links: RwLock<Arc<Vec<TokenLink>>>,
    version: watch::Sender<u64>,
}

impl Default for TokenLinkSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TokenLinkSet {
    pub fn new(links: Vec<TokenLink>) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            links: RwLock::new(Arc::new(links)),
            version,
        }
    }

    /// A references link for every interactive occurrence.
    pub fn seeded(index: &HighlightIndex) -> Self {
        let links = index
            .interactive_occurrences()
            .map(|occurrence| TokenLink::new(occurrence.range, Some(references_link(occurrence.range))))
            .collect();
        Self::new(links)
    }

    pub fn snapshot(&self) -> Arc<Vec<TokenLink>> {
        Arc::clone(&self.links.read().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Link whose range contains `position`.
    pub fn link_at(
        &self,
        position: Position,
    ) -> Option<TokenLink> {
        self.snapshot().iter().find(|link| link.range.contains(position)).cloned()
    }

    /// Notified with a new version number after every effective update.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Apply `update` and return how many links changed.
    pub fn apply(
        &self,
        update: TokenLinkUpdate,
    ) -> usize {
        let mut guard = self.links.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let changed = match update {
            TokenLinkUpdate::Clear => {
                let changed = guard.len();
                if changed > 0 {
                    *guard = Arc::new(Vec::new());
                }
                changed
            },
            TokenLinkUpdate::Merge(updates) => {
                let by_range: HashMap<Range, Option<String>> =
                    updates.into_iter().map(|link| (link.range, link.url)).collect();
                let mut matched = 0;
                let mut changed = 0;
                let merged: Vec<TokenLink> = guard
                    .iter()
                    .map(|link| match by_range.get(&link.range) {
                        Some(url) => {
                            matched += 1;
                            if *url != link.url {
                                changed += 1;
                            }
                            TokenLink::new(link.range, url.clone())
                        },
                        None => link.clone(),
                    })
                    .collect();
                if matched < by_range.len() {
                    debug!("[prefetch] dropped {} links for unknown ranges", by_range.len() - matched);
                }
                if changed > 0 {
                    *guard = Arc::new(merged);
                }
                changed
            },
        };
        drop(guard);

        if changed > 0 {
            self.version.send_modify(|version| *version += 1);
        }
        changed
    }

    pub fn clear(&self) -> usize {
        self.apply(TokenLinkUpdate::Clear)
    }
}

#[cfg(test)]
#[path = "../../tests/src/prefetch/token_links_tests.rs"]
mod tests;
