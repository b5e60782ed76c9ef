use std::{sync::Arc, time::Instant};

use futures::FutureExt;
use tracing::{debug, warn};

use crate::{
    codeintel::{CodeIntelClient, PositionParams, RemoteLookup},
    definition::{
        DefinitionCache, DefinitionPerf, DefinitionState, NavigationAction, NoticeKind, PendingAction, Resolution,
        resolve_definition,
    },
    document::BlobInfo,
    ide::Position,
    occurrence::Occurrence,
    uri::RepoUri,
};

/// Resolves go-to-definition for one document, at most one remote lookup
/// per occurrence at a time.
pub struct DefinitionPipeline {
    blob: Arc<BlobInfo>,
    document_uri: String,
    client: Arc<dyn CodeIntelClient>,
    cache: DefinitionCache,
    perf: Arc<DefinitionPerf>,
}

impl DefinitionPipeline {
    pub fn new(
        blob: Arc<BlobInfo>,
        client: Arc<dyn CodeIntelClient>,
        perf: Arc<DefinitionPerf>,
    ) -> Self {
        let document_uri = RepoUri::for_blob(&blob).to_string();
        Self {
            blob,
            document_uri,
            client,
            cache: DefinitionCache::new(),
            perf,
        }
    }

    /// Lookup for `occurrence`, started on first request and shared by every
    /// later one. `origin` is the position the user acted on.
    ///
    /// Nothing runs until the returned future is polled.
    pub fn request(
        &self,
        occurrence: &Occurrence,
        origin: Position,
    ) -> PendingAction {
        let key = occurrence.key();
        let (pending, started) = self.cache.get_or_start(key, || self.lookup(origin));
        self.perf.record_request(!started);
        if !started {
            debug!("[goto-def] joined lookup for {:?}", key.range);
        }
        pending
    }

    pub async fn resolve(
        &self,
        occurrence: &Occurrence,
        origin: Position,
    ) -> NavigationAction {
        self.request(occurrence, origin).await
    }

    pub fn state(
        &self,
        occurrence: &Occurrence,
    ) -> DefinitionState {
        self.cache.state(&occurrence.key())
    }

    pub fn cache(&self) -> &DefinitionCache {
        &self.cache
    }

    pub fn perf(&self) -> &DefinitionPerf {
        &self.perf
    }

    fn lookup(
        &self,
        origin: Position,
    ) -> futures::future::BoxFuture<'static, Resolution> {
        let blob = Arc::clone(&self.blob);
        let client = Arc::clone(&self.client);
        let perf = Arc::clone(&self.perf);
        let params = PositionParams::new(self.document_uri.clone(), origin);

        async move {
            let started = Instant::now();
            let response = client.definition(params).await;
            let elapsed = started.elapsed();

            match response {
                Ok(raw) => {
                    perf.record_remote(elapsed, true);
                    let lookup = RemoteLookup::from(raw);
                    let cacheable = !matches!(lookup, RemoteLookup::Loading);
                    let action = resolve_definition(&blob, origin, lookup);
                    debug!("[goto-def] {}:{} -> {action} in {elapsed:?}", origin.line, origin.character);
                    Resolution {
                        action,
                        cacheable,
                    }
                },
                Err(error) => {
                    perf.record_remote(elapsed, false);
                    warn!("[goto-def] lookup at {}:{} failed: {error}", origin.line, origin.character);
                    Resolution::transient(NavigationAction::Notice(NoticeKind::ResolutionFailed))
                },
            }
        }
        .boxed()
    }
}

#[cfg(test)]
#[path = "../../tests/src/definition/pipeline_tests.rs"]
mod tests;
