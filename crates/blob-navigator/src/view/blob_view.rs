use std::sync::{
    Arc, Mutex, RwLock,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    blame::{BlameKey, BlameStore, display_hunks},
    codeintel::CodeIntelError,
    config::{BlameSettings, ViewerSettings},
    decorations::{DecorationInputs, DecorationRenderer, DecorationSet, HoveredLine},
    definition::{DefinitionPerf, NavigationAction},
    document::BlobInfo,
    hover::HoverTooltip,
    ide::{Position, Range, ScreenPoint},
    navigation::{
        CoordinateMapper, KeyCommand, KeyEvent, Modifiers, Selection, command_for, occurrence_at_screen_coordinates,
        occurrence_in_direction, scroll_candidates,
    },
    occurrence::Occurrence,
    prefetch::Viewport,
    progress::PendingIndicator,
    uri::references_link,
    view::{ContextMenu, ContextMenuItem, DocumentSession, NavigationHost, Notice, ViewerServices},
};

/// Blame state shared with background loads.
#[derive(Clone)]
struct BlameLoader {
    store: BlameStore,
    settings: BlameSettings,
    visible: Arc<AtomicBool>,
}

impl BlameLoader {
    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// Fetch (or replay) blame for `session` and attach the display hunks.
    async fn load(
        &self,
        session: &DocumentSession,
    ) -> Result<usize, CodeIntelError> {
        let hunks = self.store.hunks(BlameKey::for_blob(&session.blob)).await?;
        if session.is_disposed() || !self.is_visible() {
            debug!("[blame] dropping hunks for {}", session.blob.file_path);
            return Err(CodeIntelError::Disposed);
        }
        let shown = display_hunks(&hunks, &self.settings, Utc::now());
        let count = shown.len();
        session.set_blame_hunks(Some(Arc::new(shown)));
        Ok(count)
    }
}

/// Interactive view of one blob at a time.
///
/// Input handlers read the current [`DocumentSession`] once and check after
/// every await that its generation is still the latest; results for a
/// replaced or disposed session are dropped without touching view state or
/// the host.
///
/// Link prefetching starts with the first [`BlobView::viewport_changed`];
/// later documents reuse the last reported viewport.
pub struct BlobView {
    services: ViewerServices,
    settings: ViewerSettings,
    host: Arc<dyn NavigationHost>,
    mapper: Arc<dyn CoordinateMapper>,
    session: RwLock<Arc<DocumentSession>>,
    selection: RwLock<Selection>,
    hovered: Mutex<HoveredLine>,
    viewport: Mutex<Option<Viewport>>,
    clickable: AtomicBool,
    blame: BlameLoader,
    renderer: DecorationRenderer,
    perf: Arc<DefinitionPerf>,
    generation: AtomicU64,
    cancel: CancellationToken,
}

impl BlobView {
    pub fn new(
        blob: BlobInfo,
        services: ViewerServices,
        settings: ViewerSettings,
        host: Arc<dyn NavigationHost>,
        mapper: Arc<dyn CoordinateMapper>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let perf = Arc::new(DefinitionPerf::default());
        let session = Arc::new(DocumentSession::open(blob, &services, &settings, Arc::clone(&perf), &cancel, 1));
        let view = Self {
            blame: BlameLoader {
                store: BlameStore::new(Arc::clone(&services.blame)),
                settings: settings.blame.clone(),
                visible: Arc::new(AtomicBool::new(settings.blame.visible)),
            },
            renderer: DecorationRenderer::new(settings.decorations.overscan_lines),
            services,
            settings,
            host,
            mapper,
            session: RwLock::new(Arc::clone(&session)),
            selection: RwLock::new(Selection::default()),
            hovered: Mutex::new(HoveredLine::None),
            viewport: Mutex::new(None),
            clickable: AtomicBool::new(false),
            perf,
            generation: AtomicU64::new(1),
            cancel,
        };
        view.load_blame_in_background(&session);
        view
    }

    pub fn session(&self) -> Arc<DocumentSession> {
        Arc::clone(&self.session.read().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn perf(&self) -> &DefinitionPerf {
        &self.perf
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn is_current(
        &self,
        session: &Arc<DocumentSession>,
    ) -> bool {
        !session.is_disposed() && session.generation == self.generation.load(Ordering::Acquire)
    }

    /// Show `blob` instead of the current document. The new session is fully
    /// built before it becomes visible; the old one is disposed.
    pub fn replace_document(
        &self,
        blob: BlobInfo,
    ) {
        if self.is_disposed() {
            debug!("[view] replace_document after dispose ignored");
            return;
        }
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let current = Arc::new(DocumentSession::open(
            blob,
            &self.services,
            &self.settings,
            Arc::clone(&self.perf),
            &self.cancel,
            generation,
        ));
        let previous = {
            let mut session = self.session.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::replace(&mut *session, Arc::clone(&current))
        };
        previous.dispose();
        if let Some(viewport) = *self.viewport.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) {
            current.set_viewport(viewport);
        }
        self.load_blame_in_background(&current);

        *self.selection.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Selection::default();
        *self.hovered.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = HoveredLine::None;
        self.renderer.invalidate();
    }

    /// Tear down the view. Pending work completes silently.
    pub fn dispose(&self) {
        if self.is_disposed() {
            return;
        }
        self.session().dispose();
        self.cancel.cancel();
        self.perf.log_summary();
    }

    pub fn selection(&self) -> Selection {
        *self.selection.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the selection with `range`, tell the host and scroll so some
    /// context around it stays visible.
    pub fn select(
        &self,
        range: Range,
    ) -> Selection {
        let selection = Selection::range(range);
        *self.selection.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = selection;
        self.host.selection_changed(selection);

        let line_count = self.session().document.line_count();
        for line in scroll_candidates(range, line_count) {
            if self.host.scroll_into_view(line) {
                break;
            }
        }
        selection
    }

    /// Handle a key press. Returns whether the key was consumed.
    pub async fn handle_key(
        &self,
        event: &KeyEvent,
    ) -> bool {
        if self.is_disposed() {
            return false;
        }
        let Some(command) = command_for(event) else {
            return false;
        };

        match command {
            KeyCommand::Move(direction) => {
                let session = self.session();
                let head = self.selection().head();
                if let Some(occurrence) = occurrence_in_direction(&session.index, head, direction) {
                    self.select(occurrence.range);
                }
                true
            },
            KeyCommand::GoToDefinition => {
                let session = self.session();
                let head = self.selection().head();
                let Some(occurrence) = session.index.occurrence_at(head).copied() else {
                    return false;
                };
                self.go_to_definition(&session, &occurrence, head).await;
                true
            },
            KeyCommand::HistoryBack => {
                self.host.go_back();
                true
            },
            KeyCommand::HistoryForward => {
                self.host.go_forward();
                true
            },
            KeyCommand::Swallow => true,
        }
    }

    pub fn modifiers_changed(
        &self,
        modifiers: Modifiers,
    ) {
        self.clickable.store(modifiers.is_mod(), Ordering::Relaxed);
    }

    fn occurrence_at_point(
        &self,
        session: &DocumentSession,
        point: ScreenPoint,
    ) -> Option<(Occurrence, Position)> {
        occurrence_at_screen_coordinates(&session.index, self.mapper.as_ref(), point)
            .map(|(occurrence, position)| (*occurrence, position))
    }

    /// Pointer moved over the text: warm the definition cache for the
    /// occurrence underneath and return its hover tooltip.
    pub async fn pointer_moved(
        &self,
        point: ScreenPoint,
    ) -> Option<HoverTooltip> {
        if self.is_disposed() {
            return None;
        }
        let session = self.session();
        let (occurrence, position) = self.occurrence_at_point(&session, point)?;
        if !occurrence.is_interactive() {
            return None;
        }

        if self.settings.prefetch.enable {
            let pending = session.definitions.request(&occurrence, position);
            let cancel = session.cancel.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {},
                    _ = pending => {},
                }
            });
        }

        let tooltip = session.hover.hover(&occurrence, position).await;
        if !self.is_current(&session) {
            debug!("[hover] dropping tooltip for a replaced document");
            return None;
        }
        tooltip
    }

    /// Click on the text. With the platform modifier held this runs
    /// go-to-definition; otherwise it selects the occurrence and follows its
    /// token link, if resolved. Returns whether anything happened.
    pub async fn clicked(
        &self,
        point: ScreenPoint,
        modifiers: Modifiers,
    ) -> bool {
        if self.is_disposed() {
            return false;
        }
        let session = self.session();
        let Some((occurrence, position)) = self.occurrence_at_point(&session, point) else {
            return false;
        };
        if !occurrence.is_interactive() {
            return false;
        }

        if modifiers.is_mod() {
            self.go_to_definition(&session, &occurrence, position).await;
            return true;
        }

        self.select(occurrence.range);
        if let Some(url) = session.links.link_at(position).and_then(|link| link.url) {
            self.host.push_history(&url);
        }
        true
    }

    /// Menu for a right-click, or `None` when the browser menu should open
    /// (Shift held, or nothing navigable under the pointer).
    pub fn context_menu(
        &self,
        point: ScreenPoint,
        modifiers: Modifiers,
    ) -> Option<ContextMenu> {
        if modifiers.shift || self.is_disposed() {
            return None;
        }
        let session = self.session();
        let (occurrence, _) = self.occurrence_at_point(&session, point)?;
        if !occurrence.is_interactive() {
            return None;
        }
        Some(ContextMenu {
            anchor: occurrence.range,
            items: vec![
                ContextMenuItem::GoToDefinition,
                ContextMenuItem::FindReferences {
                    url: references_link(occurrence.range),
                },
                ContextMenuItem::BrowserMenuHint,
            ],
        })
    }

    /// "Go to definition" chosen from the context menu opened at `anchor`.
    pub async fn context_menu_go_to_definition(
        &self,
        anchor: Range,
    ) -> Option<NavigationAction> {
        let session = self.session();
        let occurrence = session.index.occurrence_at(anchor.start).copied()?;
        Some(self.go_to_definition(&session, &occurrence, anchor.start).await)
    }

    /// Resolve and perform go-to-definition for `occurrence`. Returns the
    /// action, performed only if `session` is still current.
    pub async fn go_to_definition(
        &self,
        session: &Arc<DocumentSession>,
        occurrence: &Occurrence,
        origin: Position,
    ) -> NavigationAction {
        if !occurrence.is_interactive() {
            return NavigationAction::Deferred;
        }

        let indicator = PendingIndicator::begin(&self.host, occurrence.range, session.cancel.clone());
        let action = session.definitions.resolve(occurrence, origin).await;
        indicator.end();

        if !self.is_current(session) {
            debug!("[goto-def] dropping result for a replaced document");
            return action;
        }
        self.perform(&action, occurrence.range);
        action
    }

    fn perform(
        &self,
        action: &NavigationAction,
        anchor: Range,
    ) {
        match action {
            NavigationAction::Deferred => {},
            NavigationAction::Notice(kind) => {
                self.host.show_notice(Notice::new(*kind, anchor, self.settings.notices.duration()));
            },
            NavigationAction::Navigate(target) => {
                if let Some(range) = target.selection {
                    self.select(range);
                }
                self.host.push_history(&target.url);
            },
            NavigationAction::ShowDefinitions {
                url,
                ..
            } => self.host.push_history(url),
        }
    }

    pub fn viewport_changed(
        &self,
        viewport: Viewport,
    ) {
        if self.is_disposed() {
            return;
        }
        *self.viewport.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(viewport);
        self.session().set_viewport(viewport);
    }

    /// Viewport reported as byte offsets into the document text.
    pub fn visible_range_changed(
        &self,
        from: usize,
        to: usize,
    ) {
        let session = self.session();
        let viewport = Viewport::new(session.document.line_at(from), session.document.line_at(to));
        self.viewport_changed(viewport);
    }

    /// The host placed the caret at byte `offset`. Keyboard moves continue
    /// from there; the host is not notified back.
    pub fn caret_moved(
        &self,
        offset: usize,
    ) -> Selection {
        let position = self.session().document.position_of(offset);
        let selection = Selection::caret(position);
        *self.selection.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = selection;
        selection
    }

    pub fn blame_line_entered(
        &self,
        line: u32,
    ) {
        let mut hovered = self.hovered.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *hovered = hovered.enter(line);
    }

    pub fn blame_line_left(
        &self,
        line: u32,
    ) {
        let mut hovered = self.hovered.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *hovered = hovered.leave(line);
    }

    pub fn hovered_line(&self) -> HoveredLine {
        *self.hovered.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_blame_visible(&self) -> bool {
        self.blame.is_visible()
    }

    /// Toggle blame. Turning it on fetches (or replays) the hunks for the
    /// current document; turning it off drops the decorations but keeps the
    /// fetched data. Returns the number of hunks shown.
    pub async fn set_blame_visible(
        &self,
        visible: bool,
    ) -> Result<usize, CodeIntelError> {
        self.blame.visible.store(visible, Ordering::Relaxed);
        let session = self.session();
        if !visible {
            session.set_blame_hunks(None);
            return Ok(0);
        }
        self.blame.load(&session).await
    }

    /// Start loading blame for a newly opened `session` if blame is on.
    fn load_blame_in_background(
        &self,
        session: &Arc<DocumentSession>,
    ) {
        if !self.blame.is_visible() {
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            debug!("[blame] no runtime, {} waits for set_blame_visible", session.blob.file_path);
            return;
        }
        let loader = self.blame.clone();
        let session = Arc::clone(session);
        tokio::spawn(async move {
            let cancel = session.cancel.clone();
            tokio::select! {
                _ = cancel.cancelled() => {},
                result = loader.load(&session) => {
                    if let Err(error) = result {
                        debug!("[blame] background load for {} failed: {error}", session.blob.file_path);
                    }
                },
            }
        });
    }

    /// Overlays for the current viewport.
    pub fn decorations(&self) -> Arc<DecorationSet> {
        let session = self.session();
        self.renderer.render(DecorationInputs {
            index: Arc::clone(&session.index),
            links: session.links.snapshot(),
            blame: if self.is_blame_visible() { session.blame_hunks() } else { None },
            hovered: self.hovered_line(),
            clickable: self.clickable.load(Ordering::Relaxed),
            viewport: session.viewport(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src/view/blob_view_tests.rs"]
mod tests;
