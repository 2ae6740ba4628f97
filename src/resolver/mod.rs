//! # Resolver Module
//!
//! The resolver is the dispatcher's sole injection point: a capability that
//! maps an abstract [`ServiceKey`] to the registered instance(s) behind it.
//! How instances are stored is entirely the integrator's business - a DI
//! container, a static table, hand-written match logic, or the bundled
//! [`HandlerRegistry`](crate::registry::HandlerRegistry).
//!
//! ## Contract
//!
//! - Return `None` when nothing is registered for a key; never panic.
//! - Return collections in the order behaviors/handlers must execute.
//! - The dispatcher re-queries the resolver on every call and caches nothing;
//!   any instance caching is the resolver's own choice (the bundled registry
//!   shares instances via `Arc`).
//!
//! ## Type erasure
//!
//! Resolved instances cross the boundary as `Box<dyn Any + Send + Sync>`,
//! each box holding an `Arc<dyn ...>` trait object for the matching contract
//! (`Arc<dyn RequestHandler<R>>`, `Arc<dyn PipelineBehavior<R>>`, or
//! `Arc<dyn NotificationHandler<N>>`). The dispatcher downcasts at the point
//! of use; a failed downcast surfaces as
//! [`DispatchError::InvalidConfiguration`](crate::DispatchError::InvalidConfiguration).

mod core;

pub use core::{Resolved, Resolver, ServiceKey, TypeKey};
