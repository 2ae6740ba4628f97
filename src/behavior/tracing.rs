use std::any::type_name;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, Instrument};

use super::{Next, PipelineBehavior};
use crate::contracts::Request;

/// Behavior that wraps every dispatch in a tracing span and logs
/// before/after with latency.
///
/// Register it first to have its span cover the whole pipeline.
pub struct TracingBehavior;

#[async_trait]
impl<R: Request> PipelineBehavior<R> for TracingBehavior {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R::Response>,
        _cancel: CancellationToken,
    ) -> Result<R::Response> {
        let span = info_span!("dispatch", request_type = %type_name::<R>());
        debug!(request_type = %type_name::<R>(), "dispatch start");

        let start = Instant::now();
        let result = next().instrument(span).await;

        debug!(
            request_type = %type_name::<R>(),
            latency_ms = start.elapsed().as_millis() as u64,
            success = result.is_ok(),
            "dispatch complete"
        );
        result
    }
}
