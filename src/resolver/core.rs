use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::contracts::{Notification, Request};

/// Identity of a type in a [`ServiceKey`]: the `TypeId` for lookup plus the
/// type name for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Build the key for `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Human-readable type name carried for error messages and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

// Equality and hashing use the TypeId only; the name is diagnostic.
impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Abstract service descriptor the dispatcher hands to the resolver.
///
/// The three variants mirror the three lookups a dispatch can make: the
/// single handler for a request/response pair, the ordered behavior
/// collection for that pair, and the ordered handler collection for a
/// notification type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    /// The single handler for (request type, response type).
    RequestHandler { request: TypeKey, response: TypeKey },
    /// The ordered pipeline behaviors for (request type, response type).
    PipelineBehaviors { request: TypeKey, response: TypeKey },
    /// The ordered handlers for a notification type.
    NotificationHandlers { notification: TypeKey },
}

impl ServiceKey {
    /// Key for the single handler of request type `R`.
    #[must_use]
    pub fn request_handler<R: Request>() -> Self {
        Self::RequestHandler {
            request: TypeKey::of::<R>(),
            response: TypeKey::of::<R::Response>(),
        }
    }

    /// Key for the ordered behavior collection of request type `R`.
    #[must_use]
    pub fn pipeline_behaviors<R: Request>() -> Self {
        Self::PipelineBehaviors {
            request: TypeKey::of::<R>(),
            response: TypeKey::of::<R::Response>(),
        }
    }

    /// Key for the ordered handler collection of notification type `N`.
    #[must_use]
    pub fn notification_handlers<N: Notification>() -> Self {
        Self::NotificationHandlers {
            notification: TypeKey::of::<N>(),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestHandler { request, response } => {
                write!(f, "request handler for '{request}' -> '{response}'")
            }
            Self::PipelineBehaviors { request, response } => {
                write!(f, "pipeline behaviors for '{request}' -> '{response}'")
            }
            Self::NotificationHandlers { notification } => {
                write!(f, "notification handlers for '{notification}'")
            }
        }
    }
}

/// What a resolver returns for a key: a single type-erased instance or an
/// ordered collection of them.
///
/// The shape must match the key: [`ServiceKey::RequestHandler`] expects
/// [`Resolved::Instance`]; the collection keys expect
/// [`Resolved::Collection`]. A mismatched shape is reported by the dispatcher
/// as an invalid configuration.
pub enum Resolved {
    /// A single registration.
    Instance(Box<dyn Any + Send + Sync>),
    /// An ordered collection of registrations; order is execution order.
    Collection(Vec<Box<dyn Any + Send + Sync>>),
}

/// Resolves registered instances by service key.
///
/// This is intended to be backed by a container, a static table, or custom
/// resolver logic; see the [module docs](self) for the contract.
pub trait Resolver: Send + Sync {
    /// Resolve the instance(s) registered for `key`, or `None` if there are
    /// none.
    fn resolve(&self, key: &ServiceKey) -> Option<Resolved>;
}
