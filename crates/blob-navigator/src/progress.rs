//! Pending indicator for user-triggered lookups.
//!
//! The host shows a spinner between `pending_started` and
//! `pending_finished`. If the indicator is dropped without calling
//! [`PendingIndicator::end`], the `Drop` impl still reports the finish so the
//! spinner never sticks.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{ide::Range, view::NavigationHost};

static NEXT_PENDING_ID: AtomicU64 = AtomicU64::new(1);

pub struct PendingIndicator {
    host: Option<Arc<dyn NavigationHost>>,
    id: u64,
    liveness: CancellationToken,
}

impl PendingIndicator {
    /// Report the start of a lookup anchored at `anchor`. Once `liveness` is
    /// cancelled the host is no longer told about this indicator.
    pub fn begin(
        host: &Arc<dyn NavigationHost>,
        anchor: Range,
        liveness: CancellationToken,
    ) -> Self {
        let id = NEXT_PENDING_ID.fetch_add(1, Ordering::Relaxed);
        debug!("[progress] pending {id} started");
        host.pending_started(id, anchor);
        Self {
            host: Some(Arc::clone(host)),
            id,
            liveness,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn end(mut self) {
        self.finish("end");
    }

    fn finish(
        &mut self,
        reason: &str,
    ) {
        let Some(host) = self.host.take() else {
            return;
        };
        if self.liveness.is_cancelled() {
            debug!("[progress] pending {} dropped after dispose", self.id);
            return;
        }
        debug!("[progress] pending {} finished ({reason})", self.id);
        host.pending_finished(self.id);
    }
}

impl Drop for PendingIndicator {
    fn drop(&mut self) {
        self.finish("drop");
    }
}

#[cfg(test)]
#[path = "../tests/src/progress_tests.rs"]
mod tests;
