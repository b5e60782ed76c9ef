use std::sync::{Arc, Weak};

use dashmap::{DashMap, mapref::entry::Entry};
use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use tracing::debug;

use crate::{definition::NavigationAction, occurrence::OccurrenceKey};

/// A lookup that every requester of the same occurrence awaits together.
pub type PendingAction = Shared<BoxFuture<'static, NavigationAction>>;

/// What a finished lookup produced, and whether it may be replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub action: NavigationAction,
    pub cacheable: bool,
}

impl Resolution {
    pub fn cached(action: NavigationAction) -> Self {
        Self {
            action,
            cacheable: true,
        }
    }

    pub fn transient(action: NavigationAction) -> Self {
        Self {
            action,
            cacheable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionState {
    Unrequested,
    Pending,
    Resolved(NavigationAction),
}

/// Per-document map from occurrence to its in-flight or finished lookup.
///
/// Holds at most one lookup per [`OccurrenceKey`]. Entries live until the
/// document is replaced, except transient outcomes (still loading, transport
/// failure), which drop their entry when they complete so the next gesture
/// asks again. Only a lookup's own completion removes its entry.
#[derive(Default)]
pub struct DefinitionCache {
    entries: Arc<DashMap<OccurrenceKey, PendingAction>>,
}

impl DefinitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lookup for `key`, starting it with `start` if none exists.
    /// The flag is `true` when this call created the entry.
    pub fn get_or_start(
        &self,
        key: OccurrenceKey,
        start: impl FnOnce() -> BoxFuture<'static, Resolution>,
    ) -> (PendingAction, bool) {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                let pending = evicting_when_transient(Arc::downgrade(&self.entries), key, start()).boxed().shared();
                entry.insert(pending.clone());
                (pending, true)
            },
        }
    }

    pub fn state(
        &self,
        key: &OccurrenceKey,
    ) -> DefinitionState {
        let Some(pending) = self.entries.get(key).map(|entry| entry.value().clone()) else {
            return DefinitionState::Unrequested;
        };
        match pending.peek() {
            Some(action) => DefinitionState::Resolved(action.clone()),
            None => DefinitionState::Pending,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

async fn evicting_when_transient(
    entries: Weak<DashMap<OccurrenceKey, PendingAction>>,
    key: OccurrenceKey,
    lookup: BoxFuture<'static, Resolution>,
) -> NavigationAction {
    let resolution = lookup.await;
    if !resolution.cacheable
        && let Some(entries) = entries.upgrade()
    {
        debug!("[goto-def] not caching transient result for {:?}", key.range);
        entries.remove(&key);
    }
    resolution.action
}

#[cfg(test)]
#[path = "../../tests/src/definition/cache_tests.rs"]
mod tests;
