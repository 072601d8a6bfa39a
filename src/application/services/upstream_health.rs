//! Accounting of upstream failures absorbed by soft fallbacks.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::domain::errors::UpstreamError;

/// Counts upstream failures that were hidden from callers.
#[derive(Debug, Default)]
pub struct UpstreamHealth {
    failures: AtomicU64,
}

impl UpstreamHealth {
    /// Creates a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and counts a failure that is being replaced by a fallback.
    pub fn record_failure(&self, error: &UpstreamError) {
        let total = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        warn!(service = error.service(), error = %error, total, "Upstream failure, using fallback");
    }

    /// Failures recorded since start.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}
