//! Shared test utilities for the brrtbus test suite.

use brrtbus::{Resolved, Resolver, ServiceKey};

/// Resolver backed by a closure, for tests that need full control over what
/// the dispatcher sees.
pub struct FnResolver<F>(pub F);

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&ServiceKey) -> Option<Resolved> + Send + Sync,
{
    fn resolve(&self, key: &ServiceKey) -> Option<Resolved> {
        (self.0)(key)
    }
}

/// Install a fmt subscriber writing to the test harness, once per process.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
}
