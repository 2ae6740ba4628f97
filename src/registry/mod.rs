//! # Registry Module
//!
//! A ready-made [`Resolver`](crate::resolver::Resolver) so integrators
//! without a DI container can wire handlers in a few lines.
//!
//! [`HandlerRegistry`] is a plain map: register handlers and behaviors at
//! startup, wrap the registry in an `Arc`, and hand it to
//! [`Dispatcher::new`](crate::Dispatcher::new). Registration order of
//! behaviors and notification handlers is their execution order.

mod core;

pub use core::HandlerRegistry;
