//! # Dispatcher Module
//!
//! The dispatcher is the heart of brrtbus. Given a request or notification
//! value, it:
//!
//! - derives the value's runtime type,
//! - queries the configured [`Resolver`](crate::resolver::Resolver) for the
//!   matching handler and behaviors (every call re-queries; nothing is
//!   cached),
//! - composes the behavior chain (requests) or runs the sequential fan-out
//!   (notifications),
//! - and returns the outcome to the caller, failures included, untranslated.
//!
//! ## Request flow
//!
//! 1. Caller invokes [`Dispatcher::send`] with a request value
//! 2. Resolver is asked for the single handler for (request, response)
//! 3. Resolver is asked for the ordered behavior collection
//! 4. Behaviors are folded last-to-first into nested continuations, so the
//!    first resolved behavior is outermost
//! 5. The outermost continuation runs; the response flows back out through
//!    each behavior's "after" code
//!
//! ## Notification flow
//!
//! 1. Caller invokes [`Dispatcher::publish`] with a notification value
//! 2. Resolver is asked for the ordered handler collection; nothing
//!    registered means delivery completes as a no-op
//! 3. Handlers run strictly sequentially in resolver order; the first failure
//!    aborts delivery to the rest
//!
//! ## Concurrency
//!
//! The dispatcher spawns no tasks and owns no shared mutable state. It is
//! `Clone` (clones share the resolver) and safe to call from any number of
//! concurrent tasks; each call operates on its own value and its own freshly
//! resolved handler/behavior set.

mod core;

pub use core::{BehaviorVec, Dispatcher, MAX_INLINE_BEHAVIORS};
