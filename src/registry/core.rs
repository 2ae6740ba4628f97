use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::behavior::PipelineBehavior;
use crate::contracts::{Notification, NotificationHandler, Request, RequestHandler};
use crate::resolver::{Resolved, Resolver, ServiceKey};

type InstanceFactory = Box<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// Map-backed [`Resolver`] with builder-style registration.
///
/// Instances are stored behind `Arc`s; every resolve clones the `Arc` and
/// re-erases it, so the dispatcher always sees a fresh registration box while
/// the underlying instance is shared.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<ServiceKey, InstanceFactory>,
    collections: HashMap<ServiceKey, Vec<InstanceFactory>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the single handler for request type `R`.
    ///
    /// **IMPORTANT**: if a handler is already registered for `R`, it is
    /// replaced and a warning is logged. There is never more than one handler
    /// per request type.
    pub fn register_request_handler<R: Request>(&mut self, handler: Arc<dyn RequestHandler<R>>) {
        let key = ServiceKey::request_handler::<R>();
        let factory: InstanceFactory = Box::new(move || Box::new(Arc::clone(&handler)));
        if self.handlers.insert(key, factory).is_some() {
            warn!(key = %key, "replaced existing request handler registration");
        } else {
            info!(key = %key, "request handler registered");
        }
    }

    /// Append a pipeline behavior for request type `R`.
    ///
    /// Registration order is execution order: the first registered behavior
    /// is the outermost wrapper.
    pub fn register_behavior<R: Request>(&mut self, behavior: Arc<dyn PipelineBehavior<R>>) {
        let key = ServiceKey::pipeline_behaviors::<R>();
        let factory: InstanceFactory = Box::new(move || Box::new(Arc::clone(&behavior)));
        self.collections.entry(key).or_default().push(factory);
        info!(key = %key, "pipeline behavior registered");
    }

    /// Append a handler for notification type `N`.
    ///
    /// Registration order is delivery order.
    pub fn register_notification_handler<N: Notification>(
        &mut self,
        handler: Arc<dyn NotificationHandler<N>>,
    ) {
        let key = ServiceKey::notification_handlers::<N>();
        let factory: InstanceFactory = Box::new(move || Box::new(Arc::clone(&handler)));
        self.collections.entry(key).or_default().push(factory);
        info!(key = %key, "notification handler registered");
    }
}

impl Resolver for HandlerRegistry {
    fn resolve(&self, key: &ServiceKey) -> Option<Resolved> {
        if let Some(factory) = self.handlers.get(key) {
            return Some(Resolved::Instance(factory()));
        }
        self.collections
            .get(key)
            .map(|factories| Resolved::Collection(factories.iter().map(|factory| factory()).collect()))
    }
}
