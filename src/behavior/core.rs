use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::contracts::Request;

/// Continuation invoking the remainder of the dispatch pipeline.
///
/// Each behavior receives the continuation for everything nested inside it
/// (the remaining behaviors plus the terminal handler). Calling it consumes
/// it, so a behavior invokes the rest of the pipeline at most once; dropping
/// it without calling short-circuits the dispatch.
pub type Next<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, Result<T>> + Send + 'a>;

/// A pipeline behavior that can wrap or short-circuit request handling.
///
/// Behaviors execute in the order they are returned by the configured
/// resolver; the first returned behavior is the outermost wrapper.
#[async_trait]
pub trait PipelineBehavior<R: Request>: Send + Sync + 'static {
    /// Handle a request within the pipeline.
    ///
    /// # Arguments
    ///
    /// * `request` - The request instance being dispatched
    /// * `next` - Continuation invoking the next pipeline step
    /// * `cancel` - The caller's cancellation token, forwarded unchanged
    async fn handle(
        &self,
        request: &R,
        next: Next<'_, R::Response>,
        cancel: CancellationToken,
    ) -> Result<R::Response>;
}
