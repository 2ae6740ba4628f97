//! # Contracts Module
//!
//! Type-level contracts for everything the dispatcher routes.
//!
//! A [`Request`] is a value dispatched to exactly one [`RequestHandler`],
//! producing one typed response. A [`Notification`] is a value delivered to
//! zero or more [`NotificationHandler`]s, producing no response.
//!
//! The marker traits carry no behavior: implementing [`Request`] only fixes
//! the response type the dispatcher returns for that request. Handlers expose
//! a single asynchronous `handle` operation and receive the caller's
//! cancellation token unchanged; honoring the token is cooperative and is the
//! handler's responsibility.

mod core;

pub use core::{Notification, NotificationHandler, Request, RequestHandler};
