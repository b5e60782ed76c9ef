use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tracing::info;

/// Runtime counters for go-to-definition lookups.
#[derive(Debug, Default)]
pub struct DefinitionPerf {
    requests: AtomicU64,
    coalesced: AtomicU64,
    remote_calls: AtomicU64,
    failures: AtomicU64,
    total_remote_ns: AtomicU64,
}

/// Point-in-time copy of [`DefinitionPerf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefinitionPerfSnapshot {
    pub requests: u64,
    pub coalesced: u64,
    pub remote_calls: u64,
    pub failures: u64,
    pub total_remote_ns: u64,
}

impl DefinitionPerf {
    pub fn record_request(
        &self,
        coalesced: bool,
    ) {
        let requests = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        if coalesced {
            self.coalesced.fetch_add(1, Ordering::Relaxed);
        }
        if requests % 200 == 0 {
            self.log_summary();
        }
    }

    pub fn record_remote(
        &self,
        elapsed: Duration,
        succeeded: bool,
    ) {
        self.remote_calls.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        let elapsed_ns = elapsed.as_nanos().min(u64::MAX as u128) as u64;
        self.total_remote_ns.fetch_add(elapsed_ns, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DefinitionPerfSnapshot {
        DefinitionPerfSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            remote_calls: self.remote_calls.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            total_remote_ns: self.total_remote_ns.load(Ordering::Relaxed),
        }
    }

    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        if snapshot.requests == 0 {
            info!("[perf][goto-def] no requests recorded yet");
            return;
        }

        let DefinitionPerfSnapshot {
            requests,
            coalesced,
            remote_calls,
            failures,
            total_remote_ns,
        } = snapshot;
        let avg_ms = if remote_calls == 0 {
            0.0
        } else {
            total_remote_ns as f64 / remote_calls as f64 / 1_000_000.0
        };

        info!(
            "[perf][goto-def] requests={requests}, coalesced={coalesced}, remote_calls={remote_calls}, \
             failures={failures}, avg_remote_ms={avg_ms:.2}"
        );
    }
}
