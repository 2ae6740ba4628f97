use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{Next, PipelineBehavior};
use crate::contracts::Request;

/// Behavior collecting dispatch metrics.
///
/// Tracks dispatch counts, failures, and latency. All counters use atomic
/// operations for thread-safe updates without locks. This behavior is
/// passive - it never blocks or short-circuits a dispatch, only observes and
/// records.
///
/// Register one shared instance (behind an `Arc`) for every request type you
/// want counted, and keep a clone of the `Arc` to read the metrics back.
pub struct MetricsBehavior {
    dispatch_count: AtomicUsize,
    failure_count: AtomicUsize,
    total_latency_ns: AtomicU64,
}

impl Default for MetricsBehavior {
    fn default() -> Self {
        Self {
            dispatch_count: AtomicUsize::new(0),
            failure_count: AtomicUsize::new(0),
            total_latency_ns: AtomicU64::new(0),
        }
    }
}

impl MetricsBehavior {
    /// Create a metrics behavior with all counters initialized to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of dispatches that passed through this behavior.
    #[must_use]
    pub fn dispatch_count(&self) -> usize {
        self.dispatch_count.load(Ordering::Relaxed)
    }

    /// Number of dispatches whose pipeline returned an error.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Mean latency of the wrapped pipeline across all dispatches.
    ///
    /// Returns zero duration if nothing has been dispatched yet.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.dispatch_count.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }
}

#[async_trait]
impl<R: Request> PipelineBehavior<R> for MetricsBehavior {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R::Response>,
        _cancel: CancellationToken,
    ) -> Result<R::Response> {
        self.dispatch_count.fetch_add(1, Ordering::Relaxed);

        let start = Instant::now();
        let result = next().await;

        self.total_latency_ns
            .fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);
        if result.is_err() {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
        }
        result
    }
}
