//! Dispatcher core - hot path for request and notification dispatch.

use std::any::type_name;
use std::sync::Arc;

use smallvec::SmallVec;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::behavior::{Next, PipelineBehavior};
use crate::contracts::{Notification, NotificationHandler, Request, RequestHandler};
use crate::error::DispatchError;
use crate::resolver::{Resolved, Resolver, ServiceKey};

/// Maximum behaviors held inline before the chain spills to the heap.
pub const MAX_INLINE_BEHAVIORS: usize = 4;

/// Stack-allocated behavior chain for the hot path.
///
/// Most request types carry a handful of behaviors at most; the inline
/// capacity keeps chain construction allocation-free in the common case.
pub type BehaviorVec<R> = SmallVec<[Arc<dyn PipelineBehavior<R>>; MAX_INLINE_BEHAVIORS]>;

/// Routes requests to their single handler and notifications to every
/// registered handler, with all lookup delegated to the configured
/// [`Resolver`].
///
/// The dispatcher holds no registrations of its own and keeps no state
/// between calls; cloning it is cheap and clones share the resolver.
#[derive(Clone)]
pub struct Dispatcher {
    resolver: Arc<dyn Resolver>,
}

impl Dispatcher {
    /// Create a dispatcher backed by `resolver`.
    #[must_use]
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Dispatcher { resolver }
    }

    /// Send a request to its single handler and return the response.
    ///
    /// Pipeline behaviors resolved for the request type execute in resolver
    /// order around the handler; the first behavior is outermost. A behavior
    /// that does not invoke its continuation short-circuits the dispatch and
    /// its return value becomes the response.
    ///
    /// The cancellation token is forwarded unchanged to every behavior and
    /// the handler; the dispatcher itself never polls or enforces it.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::HandlerNotFound`] if the resolver has no handler
    ///   for the request/response pair
    /// - [`DispatchError::InvalidConfiguration`] if a resolved registration
    ///   has the wrong shape for its key
    /// - [`DispatchError::Handler`] carrying any failure raised by a behavior
    ///   or the handler, untranslated
    pub async fn send<R: Request>(
        &self,
        request: R,
        cancel: CancellationToken,
    ) -> Result<R::Response, DispatchError> {
        let key = ServiceKey::request_handler::<R>();

        // Handler lookup
        debug!(key = %key, "handler lookup");
        let handler = match self.resolver.resolve(&key) {
            Some(Resolved::Instance(instance)) => {
                match instance.downcast::<Arc<dyn RequestHandler<R>>>() {
                    Ok(handler) => *handler,
                    Err(_) => {
                        error!(key = %key, "resolved handler is not assignable to the handler contract");
                        return Err(DispatchError::invalid_configuration(
                            key,
                            type_name::<Arc<dyn RequestHandler<R>>>(),
                        ));
                    }
                }
            }
            Some(Resolved::Collection(_)) => {
                error!(key = %key, "resolver returned a collection for a single-instance key");
                return Err(DispatchError::invalid_configuration(
                    key,
                    type_name::<Arc<dyn RequestHandler<R>>>(),
                ));
            }
            None => {
                error!(key = %key, "handler not found");
                return Err(DispatchError::handler_not_found::<R>());
            }
        };

        // Behavior lookup; an absent collection means "no behaviors"
        let behaviors_key = ServiceKey::pipeline_behaviors::<R>();
        let behaviors: BehaviorVec<R> = match self.resolver.resolve(&behaviors_key) {
            Some(Resolved::Collection(entries)) => {
                let mut chain = BehaviorVec::<R>::with_capacity(entries.len());
                for entry in entries {
                    match entry.downcast::<Arc<dyn PipelineBehavior<R>>>() {
                        Ok(behavior) => chain.push(*behavior),
                        Err(_) => {
                            error!(key = %behaviors_key, "resolved behavior is not assignable to the behavior contract");
                            return Err(DispatchError::invalid_configuration(
                                behaviors_key,
                                type_name::<Arc<dyn PipelineBehavior<R>>>(),
                            ));
                        }
                    }
                }
                chain
            }
            Some(Resolved::Instance(_)) => {
                error!(key = %behaviors_key, "resolver returned a single instance for a collection key");
                return Err(DispatchError::invalid_configuration(
                    behaviors_key,
                    type_name::<Arc<dyn PipelineBehavior<R>>>(),
                ));
            }
            None => BehaviorVec::new(),
        };

        debug!(key = %key, behaviors = behaviors.len(), "dispatching request");

        // Fold the chain last-to-first so the first resolved behavior ends up
        // outermost: it runs first and sees the response last.
        let request = &request;
        let mut next: Next<'_, R::Response> = {
            let cancel = cancel.clone();
            Box::new(move || Box::pin(async move { handler.handle(request, cancel).await }))
        };
        for behavior in behaviors.into_iter().rev() {
            let inner = next;
            let cancel = cancel.clone();
            next = Box::new(move || {
                Box::pin(async move { behavior.handle(request, inner, cancel).await })
            });
        }

        next().await.map_err(DispatchError::Handler)
    }

    /// Publish a notification to every handler registered for its type.
    ///
    /// Handlers run strictly sequentially in resolver order: handler *k+1*
    /// does not start until handler *k* has completed. The first failure
    /// aborts delivery to the remaining handlers and propagates to the
    /// caller; handlers that already completed are not compensated.
    ///
    /// An absent handler collection is a successful no-op, not an error.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::InvalidConfiguration`] if a resolved registration
    ///   has the wrong shape for its key
    /// - [`DispatchError::Handler`] carrying the first handler failure,
    ///   untranslated
    pub async fn publish<N: Notification>(
        &self,
        notification: N,
        cancel: CancellationToken,
    ) -> Result<(), DispatchError> {
        let key = ServiceKey::notification_handlers::<N>();

        debug!(key = %key, "notification handler lookup");
        let entries = match self.resolver.resolve(&key) {
            Some(Resolved::Collection(entries)) => entries,
            Some(Resolved::Instance(_)) => {
                error!(key = %key, "resolver returned a single instance for a collection key");
                return Err(DispatchError::invalid_configuration(
                    key,
                    type_name::<Arc<dyn NotificationHandler<N>>>(),
                ));
            }
            None => {
                debug!(key = %key, "no notification handlers resolved");
                return Ok(());
            }
        };

        debug!(key = %key, handlers = entries.len(), "publishing notification");

        let notification = &notification;
        for (index, entry) in entries.into_iter().enumerate() {
            // Shape is checked per entry, in delivery order; handlers ahead
            // of a bad entry have already run by the time it is reported.
            let handler = match entry.downcast::<Arc<dyn NotificationHandler<N>>>() {
                Ok(handler) => *handler,
                Err(_) => {
                    error!(key = %key, index, "resolved notification handler is not assignable to the handler contract");
                    return Err(DispatchError::invalid_configuration(
                        key,
                        type_name::<Arc<dyn NotificationHandler<N>>>(),
                    ));
                }
            };

            // Strictly sequential: await each handler before the next starts.
            if let Err(err) = handler.handle(notification, cancel.clone()).await {
                error!(key = %key, index, "notification handler failed; delivery aborted");
                return Err(DispatchError::Handler(err));
            }
        }

        Ok(())
    }
}
