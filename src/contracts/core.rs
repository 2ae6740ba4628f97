use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A request dispatched to exactly one handler, producing a single response.
///
/// The implementing type's runtime identity selects the handler and pipeline
/// behaviors; the associated `Response` type is what
/// [`Dispatcher::send`](crate::Dispatcher::send) returns for it.
///
/// # Example
///
/// ```rust
/// use brrtbus::Request;
///
/// struct GetPet {
///     id: u64,
/// }
///
/// impl Request for GetPet {
///     type Response = String;
/// }
/// ```
pub trait Request: Send + Sync + 'static {
    /// The response type produced by this request's handler.
    type Response: Send + 'static;
}

/// A notification delivered to all handlers registered for its concrete type.
///
/// Notifications produce no response; delivery is strictly sequential and
/// stops at the first failing handler.
pub trait Notification: Send + Sync + 'static {}

/// Handles a request and produces a response.
///
/// Exactly one usable handler must be resolvable per request type for
/// dispatch to succeed.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    /// Handle a request.
    ///
    /// # Arguments
    ///
    /// * `request` - The request instance being dispatched
    /// * `cancel` - The caller's cancellation token, forwarded unchanged
    async fn handle(&self, request: &R, cancel: CancellationToken) -> Result<R::Response>;
}

/// Reacts to a published notification.
///
/// Any number of handlers may be registered for one notification type; they
/// run in registration order, one at a time.
#[async_trait]
pub trait NotificationHandler<N: Notification>: Send + Sync + 'static {
    /// Handle a notification.
    async fn handle(&self, notification: &N, cancel: CancellationToken) -> Result<()>;
}
