//! # Behavior Module
//!
//! Pipeline behaviors wrap request dispatch the way middleware wraps an HTTP
//! request: each behavior runs code before and/or after the rest of the
//! pipeline, and may skip the rest of the pipeline entirely by not invoking
//! its continuation.
//!
//! ## Ordering
//!
//! Behaviors execute in the order the resolver returns them. The first
//! behavior is outermost: it runs first on the way in and last on the way
//! out. Given behaviors `[B1, B2]`, a dispatch runs
//!
//! ```text
//! B1 (before) → B2 (before) → handler → B2 (after) → B1 (after)
//! ```
//!
//! ## Short-circuiting
//!
//! A behavior that returns without invoking [`Next`] prevents every inner
//! behavior and the handler from running; its return value becomes the
//! response.
//!
//! ## Built-in behaviors
//!
//! - [`TracingBehavior`] - span per dispatch with before/after latency logging
//! - [`MetricsBehavior`] - lock-free dispatch counters and latency tracking

mod core;
mod metrics;
mod tracing;

pub use core::{Next, PipelineBehavior};
pub use metrics::MetricsBehavior;
pub use tracing::TracingBehavior;
