//! Routes keyboard input to whichever view has focus.

use std::sync::{Arc, RwLock, Weak};

use tracing::debug;

use crate::{
    navigation::{KeyEvent, Modifiers},
    view::BlobView,
};

/// Holds a weak reference to the focused view. Dropping the view clears
/// focus implicitly.
#[derive(Default)]
pub struct FocusRouter {
    focused: RwLock<Option<Weak<BlobView>>>,
}

impl FocusRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(
        &self,
        view: &Arc<BlobView>,
    ) {
        *self.focused.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::downgrade(view));
    }

    /// Clear focus if `view` holds it.
    pub fn blur(
        &self,
        view: &Arc<BlobView>,
    ) {
        let mut focused = self.focused.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if focused.as_ref().is_some_and(|current| std::ptr::eq(current.as_ptr(), Arc::as_ptr(view))) {
            *focused = None;
        }
    }

    pub fn focused(&self) -> Option<Arc<BlobView>> {
        self.focused.read().unwrap_or_else(|poisoned| poisoned.into_inner()).as_ref().and_then(Weak::upgrade)
    }

    /// Forward a key press to the focused view. Returns whether it was handled.
    pub async fn route_key(
        &self,
        event: &KeyEvent,
    ) -> bool {
        let Some(view) = self.focused() else {
            debug!("[focus] no focused view for {:?}", event.key);
            return false;
        };
        view.handle_key(event).await
    }

    pub fn route_modifiers(
        &self,
        modifiers: Modifiers,
    ) {
        if let Some(view) = self.focused() {
            view.modifiers_changed(modifiers);
        }
    }
}

#[cfg(test)]
#[path = "../tests/src/focus_tests.rs"]
mod tests;
