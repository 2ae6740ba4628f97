use std::any::type_name;

use thiserror::Error;

use crate::contracts::Request;
use crate::resolver::ServiceKey;

/// Failures surfaced by [`Dispatcher::send`](crate::Dispatcher::send) and
/// [`Dispatcher::publish`](crate::Dispatcher::publish).
///
/// The dispatcher performs no local recovery: every failure propagates
/// directly to the caller. Handler and behavior errors pass through
/// [`DispatchError::Handler`] untranslated, so callers can downcast to the
/// original error type when they need differentiated recovery.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler registration matched the request/response pair.
    ///
    /// Only `send` raises this; publishing with no registered handlers is a
    /// legitimate no-op.
    #[error("handler was not found for request type '{request_type}' with response type '{response_type}'")]
    HandlerNotFound {
        /// Name of the concrete request type.
        request_type: &'static str,
        /// Name of the statically expected response type.
        response_type: &'static str,
    },

    /// The resolver answered, but the registration does not satisfy the
    /// required shape for the key.
    ///
    /// This signals a wiring bug in the integrator's resolver, not a
    /// transient condition.
    #[error("invalid resolver configuration for {key}: registration is not assignable to '{expected}'")]
    InvalidConfiguration {
        /// The service key the resolver was asked for.
        key: ServiceKey,
        /// The instance type the dispatcher required.
        expected: &'static str,
    },

    /// A handler or behavior operation failed.
    ///
    /// The original error is preserved untouched - identity, message, and
    /// source chain.
    #[error(transparent)]
    Handler(anyhow::Error),
}

impl DispatchError {
    pub(crate) fn handler_not_found<R: Request>() -> Self {
        Self::HandlerNotFound {
            request_type: type_name::<R>(),
            response_type: type_name::<R::Response>(),
        }
    }

    pub(crate) fn invalid_configuration(key: ServiceKey, expected: &'static str) -> Self {
        Self::InvalidConfiguration { key, expected }
    }
}
