//! # brrtbus
//!
//! **brrtbus** is an in-process, trait-driven request/notification dispatcher
//! (mediator) for async Rust.
//!
//! ## Overview
//!
//! brrtbus routes a typed request value to exactly one registered handler and
//! returns a single typed response, and routes a typed notification value to
//! all registered handlers for that type. Callers stay decoupled from
//! concrete handler implementations: every lookup goes through an externally
//! supplied [`Resolver`], queried by abstract service key at the point of
//! use.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`contracts`]** - Request/notification envelope types and the async
//!   handler traits
//! - **[`behavior`]** - Pipeline behaviors that wrap dispatch, plus built-in
//!   tracing and metrics behaviors
//! - **[`resolver`]** - The service-key/resolver abstraction backing all
//!   handler and behavior lookup
//! - **[`dispatcher`]** - The dispatch core: `send` with behavior chaining,
//!   `publish` with sequential fan-out
//! - **[`registry`]** - A map-backed resolver for integrators without a DI
//!   container
//! - **[`error`]** - The dispatch error taxonomy
//!
//! ### Dispatch Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Dispatcher
//!     participant Resolver
//!     participant B1 as Behavior 1
//!     participant B2 as Behavior 2
//!     participant Handler
//!
//!     Caller->>Dispatcher: send(request, cancel)
//!     Dispatcher->>Resolver: resolve(request handler key)
//!
//!     alt Nothing registered
//!         Dispatcher-->>Caller: Err(HandlerNotFound)
//!     end
//!
//!     Dispatcher->>Resolver: resolve(pipeline behaviors key)
//!     Note over Dispatcher: fold behaviors last-to-first<br/>into nested continuations
//!
//!     Dispatcher->>B1: handle(request, next, cancel)
//!     B1->>B2: next()
//!     B2->>Handler: next()
//!     Handler-->>B2: response
//!     B2-->>B1: response
//!     B1-->>Dispatcher: response
//!     Dispatcher-->>Caller: Ok(response)
//! ```
//!
//! `publish` is simpler: resolve the handler collection for the
//! notification's type, then invoke each handler in order, awaiting each
//! before starting the next. The first failure aborts delivery to the rest.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use brrtbus::{Dispatcher, HandlerRegistry, Request, RequestHandler};
//! use tokio_util::sync::CancellationToken;
//!
//! struct Ping;
//!
//! impl Request for Ping {
//!     type Response = i32;
//! }
//!
//! struct PingHandler;
//!
//! #[async_trait]
//! impl RequestHandler<Ping> for PingHandler {
//!     async fn handle(&self, _request: &Ping, _cancel: CancellationToken) -> anyhow::Result<i32> {
//!         Ok(1)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut registry = HandlerRegistry::new();
//!     registry.register_request_handler::<Ping>(Arc::new(PingHandler));
//!
//!     let dispatcher = Dispatcher::new(Arc::new(registry));
//!     let response = dispatcher.send(Ping, CancellationToken::new()).await?;
//!     assert_eq!(response, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Architectural Patterns
//!
//! 1. **Resolver-Driven**: handler and behavior lookup is a pluggable
//!    capability, re-queried on every dispatch - no hidden caching
//! 2. **Continuation Chaining**: behaviors receive the rest of the pipeline
//!    as a one-shot continuation they may invoke or drop (short-circuit)
//! 3. **Sequential Fan-Out**: notification handlers run one at a time, in
//!    order, with first-failure-stops-the-rest semantics
//! 4. **Transparent Failures**: handler and behavior errors reach the caller
//!    untranslated
//!
//! ## Runtime Considerations
//!
//! brrtbus spawns no tasks and is runtime-agnostic: it only awaits the
//! futures your handlers return, on whatever runtime drives the call.
//! Cancellation is cooperative - the caller's [`CancellationToken`]
//! (`tokio-util`) is forwarded unchanged through every behavior and handler,
//! and honoring it is their responsibility.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod behavior;
pub mod contracts;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod resolver;

pub use behavior::{MetricsBehavior, Next, PipelineBehavior, TracingBehavior};
pub use contracts::{Notification, NotificationHandler, Request, RequestHandler};
pub use dispatcher::{BehaviorVec, Dispatcher, MAX_INLINE_BEHAVIORS};
pub use error::DispatchError;
pub use registry::HandlerRegistry;
pub use resolver::{Resolved, Resolver, ServiceKey, TypeKey};
