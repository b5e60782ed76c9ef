use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    blame::{BlameHunk, BlameSource},
    codeintel::{CodeIntelClient, DefinitionSource},
    config::ViewerSettings,
    definition::{DefinitionPerf, DefinitionPipeline},
    document::{BlobInfo, Document},
    hover::HoverResolver,
    occurrence::{HighlightIndex, occurrences_from_blob},
    prefetch::{PrefetchContext, Prefetcher, TokenLinkSet, Viewport},
};

/// Remote collaborators shared by every document a view shows.
#[derive(Clone)]
pub struct ViewerServices {
    pub code_intel: Arc<dyn CodeIntelClient>,
    pub definitions: Arc<dyn DefinitionSource>,
    pub blame: Arc<dyn BlameSource>,
}

impl ViewerServices {
    /// One implementation serving all three roles.
    pub fn from_single<T>(service: Arc<T>) -> Self
    where
        T: CodeIntelClient + DefinitionSource + BlameSource + 'static,
    {
        Self {
            code_intel: service.clone(),
            definitions: service.clone(),
            blame: service,
        }
    }
}

/// State owned by one displayed document. Replaced wholesale when the view
/// switches documents; nothing in it is patched in place except the token
/// links, the definition cache and the blame hunks.
pub struct DocumentSession {
    pub(crate) blob: Arc<BlobInfo>,
    pub(crate) document: Document,
    pub(crate) index: Arc<HighlightIndex>,
    pub(crate) links: Arc<TokenLinkSet>,
    pub(crate) definitions: DefinitionPipeline,
    pub(crate) hover: HoverResolver,
    pub(crate) prefetcher: Option<Prefetcher>,
    pub(crate) blame: RwLock<Option<Arc<Vec<BlameHunk>>>>,
    pub(crate) viewport: RwLock<Viewport>,
    pub(crate) cancel: CancellationToken,
    pub(crate) generation: u64,
}

impl DocumentSession {
    pub(crate) fn open(
        blob: BlobInfo,
        services: &ViewerServices,
        settings: &ViewerSettings,
        perf: Arc<DefinitionPerf>,
        parent: &CancellationToken,
        generation: u64,
    ) -> Self {
        let blob = Arc::new(blob);
        let document = Document::new(blob.content.clone());
        let occurrences = occurrences_from_blob(&blob).unwrap_or_else(|error| {
            warn!("[occurrences] {}: {error}; showing the file without code navigation", blob.file_path);
            Vec::new()
        });
        let index = Arc::new(HighlightIndex::new(occurrences, document.line_count()));
        let links = Arc::new(TokenLinkSet::seeded(&index));
        let cancel = parent.child_token();

        let prefetcher = if settings.prefetch.enable && tokio::runtime::Handle::try_current().is_ok() {
            let context = PrefetchContext {
                blob: Arc::clone(&blob),
                index: Arc::clone(&index),
                links: Arc::clone(&links),
                source: Arc::clone(&services.definitions),
            };
            Some(Prefetcher::spawn(context, settings.prefetch.debounce(), cancel.child_token()))
        } else {
            None
        };

        info!(
            "[view] opened #{generation} {}@{} {} ({} occurrences, {} links)",
            blob.repo_name,
            blob.revision,
            blob.file_path,
            index.occurrences().len(),
            links.len()
        );

        Self {
            definitions: DefinitionPipeline::new(Arc::clone(&blob), Arc::clone(&services.code_intel), perf),
            hover: HoverResolver::new(&blob, Arc::clone(&services.code_intel)),
            blob,
            document,
            index,
            links,
            prefetcher,
            blame: RwLock::new(None),
            viewport: RwLock::new(Viewport::new(0, 0)),
            cancel,
            generation,
        }
    }

    pub fn blob(&self) -> &Arc<BlobInfo> {
        &self.blob
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn index(&self) -> &Arc<HighlightIndex> {
        &self.index
    }

    pub fn links(&self) -> &Arc<TokenLinkSet> {
        &self.links
    }

    pub fn definitions(&self) -> &DefinitionPipeline {
        &self.definitions
    }

    /// Position of this session in the sequence of documents its view has shown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn blame_hunks(&self) -> Option<Arc<Vec<BlameHunk>>> {
        self.blame.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub(crate) fn set_blame_hunks(
        &self,
        hunks: Option<Arc<Vec<BlameHunk>>>,
    ) {
        *self.blame.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = hunks;
    }

    pub(crate) fn viewport(&self) -> Viewport {
        *self.viewport.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn set_viewport(
        &self,
        viewport: Viewport,
    ) {
        *self.viewport.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = viewport;
        if let Some(prefetcher) = &self.prefetcher {
            prefetcher.viewport_changed(viewport);
        }
    }

    /// Cancel all async work and drop the links. Idempotent.
    pub(crate) fn dispose(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        match &self.prefetcher {
            Some(prefetcher) => prefetcher.stop(),
            None => {
                self.links.clear();
            },
        }
        info!("[view] disposed {}", self.blob.file_path);
    }
}
