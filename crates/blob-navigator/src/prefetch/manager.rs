use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    codeintel::{CodeIntelError, DefinitionSource, RangeDefinition, RangeDefinitionsRequest},
    document::BlobInfo,
    occurrence::HighlightIndex,
    prefetch::{TokenLink, TokenLinkSet, TokenLinkUpdate},
    uri::{BlobUrl, UrlPosition},
};

/// Visible lines, zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub first_line: u32,
    pub last_line: u32,
}

impl Viewport {
    pub fn new(
        first_line: u32,
        last_line: u32,
    ) -> Self {
        Self {
            first_line: first_line.min(last_line),
            last_line: first_line.max(last_line),
        }
    }
}

/// Everything a prefetch needs from its document session.
#[derive(Clone)]
pub struct PrefetchContext {
    pub blob: Arc<BlobInfo>,
    pub index: Arc<HighlightIndex>,
    pub links: Arc<TokenLinkSet>,
    pub source: Arc<dyn DefinitionSource>,
}

/// Resolve definition links for the interactive occurrences lying entirely
/// inside `viewport` and merge them into the context's link set.
///
/// Returns the number of links that changed.
pub async fn prefetch_viewport(
    context: &PrefetchContext,
    viewport: Viewport,
) -> Result<usize, CodeIntelError> {
    let ranges: Vec<_> = context
        .index
        .interactive_occurrences()
        .map(|occurrence| occurrence.range)
        .filter(|range| range.within_lines(viewport.first_line, viewport.last_line))
        .collect();
    if ranges.is_empty() {
        return Ok(0);
    }

    let request = RangeDefinitionsRequest {
        repo_name: context.blob.repo_name.clone(),
        revision: context.blob.commit_id.clone(),
        file_path: context.blob.file_path.clone(),
        ranges,
    };
    let definitions = context.source.definitions_for_ranges(request).await?;
    Ok(context.links.apply(TokenLinkUpdate::Merge(definition_links(&context.blob, &definitions))))
}

/// Links for the resolved entries of a batch lookup. Unresolved entries are
/// skipped so their references links stay in place.
pub fn definition_links(
    blob: &BlobInfo,
    definitions: &[RangeDefinition],
) -> Vec<TokenLink> {
    definitions
        .iter()
        .filter_map(|entry| {
            let target = entry.definition.as_ref()?;
            let revision = if blob.is_same_snapshot(&target.repository, &target.commit) {
                blob.revision.as_str()
            } else {
                target.commit.as_str()
            };
            let mut url = BlobUrl::new(&target.repository, revision, &target.path);
            if let Some(range) = target.range {
                url = url.at(UrlPosition::from_position(range.start));
            }
            Some(TokenLink::new(entry.range, Some(url.to_string())))
        })
        .collect()
}

/// Background task resolving token links for the visible viewport.
///
/// Viewport changes are debounced; only the last one of a burst is fetched.
/// At most one request is in flight; changes arriving meanwhile queue up and
/// collapse into the next debounce. Stopping the prefetcher clears its links.
pub struct Prefetcher {
    sender: mpsc::UnboundedSender<Viewport>,
    cancel: CancellationToken,
    links: Arc<TokenLinkSet>,
    task: JoinHandle<()>,
}

impl Prefetcher {
    pub fn spawn(
        context: PrefetchContext,
        debounce: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let links = Arc::clone(&context.links);
        let task = tokio::spawn(run(context, receiver, debounce, cancel.clone()));
        Self {
            sender,
            cancel,
            links,
            task,
        }
    }

    pub fn viewport_changed(
        &self,
        viewport: Viewport,
    ) {
        if self.sender.send(viewport).is_err() {
            debug!("[prefetch] viewport change after shutdown ignored");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the task and clear every link. Results still in flight are
    /// dropped when they arrive.
    pub fn stop(&self) {
        self.cancel.cancel();
        self.links.clear();
    }
}

impl Drop for Prefetcher {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(
    context: PrefetchContext,
    mut receiver: mpsc::UnboundedReceiver<Viewport>,
    debounce: Duration,
    cancel: CancellationToken,
) {
    info!("[prefetch] started for {}", context.blob.file_path);
    let mut closed = false;

    while !closed {
        let mut latest = tokio::select! {
            _ = cancel.cancelled() => break,
            next = receiver.recv() => match next {
                Some(viewport) => viewport,
                None => break,
            },
        };

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    closed = true;
                    break;
                },
                next = receiver.recv() => match next {
                    Some(viewport) => latest = viewport,
                    None => {
                        closed = true;
                        break;
                    },
                },
                _ = sleep(debounce) => break,
            }
        }
        if cancel.is_cancelled() {
            break;
        }

        debug!("[prefetch] fetching lines {}..={}", latest.first_line, latest.last_line);
        tokio::select! {
            _ = cancel.cancelled() => break,
            result = prefetch_viewport(&context, latest) => match result {
                Ok(changed) => debug!("[prefetch] merged {changed} links"),
                Err(error) => warn!("[prefetch] lines {}..={} failed: {error}", latest.first_line, latest.last_line),
            },
        }
    }

    if cancel.is_cancelled() {
        context.links.clear();
    }
    info!("[prefetch] stopped for {}", context.blob.file_path);
}

#[cfg(test)]
#[path = "../../tests/src/prefetch/manager_tests.rs"]
mod tests;
