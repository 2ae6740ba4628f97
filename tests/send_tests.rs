//! Tests for the request dispatch path (`Dispatcher::send`).
//!
//! # Test Coverage
//!
//! Validates the send path's core responsibilities:
//! - Handler resolution and single invocation
//! - HandlerNotFound diagnostics naming both types
//! - Invalid resolver configurations (wrong type, wrong shape)
//! - Cancellation token propagation through behaviors and handler
//! - Transparent propagation of handler failures

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use brrtbus::{
    DispatchError, Dispatcher, HandlerRegistry, Next, PipelineBehavior, Request, RequestHandler,
    Resolved, ServiceKey,
};
use tokio_util::sync::CancellationToken;

mod common;
use common::{init_tracing, FnResolver};

struct Ping;

impl Request for Ping {
    type Response = i32;
}

struct PingHandler {
    value: i32,
    calls: AtomicUsize,
}

impl PingHandler {
    fn new(value: i32) -> Self {
        Self {
            value,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RequestHandler<Ping> for PingHandler {
    async fn handle(&self, _request: &Ping, _cancel: CancellationToken) -> Result<i32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value)
    }
}

struct FailingHandler;

#[async_trait]
impl RequestHandler<Ping> for FailingHandler {
    async fn handle(&self, _request: &Ping, _cancel: CancellationToken) -> Result<i32> {
        Err(anyhow!("boom"))
    }
}

struct TokenProbeHandler {
    value: i32,
    observed_cancelled: AtomicBool,
}

#[async_trait]
impl RequestHandler<Ping> for TokenProbeHandler {
    async fn handle(&self, _request: &Ping, cancel: CancellationToken) -> Result<i32> {
        self.observed_cancelled
            .store(cancel.is_cancelled(), Ordering::SeqCst);
        Ok(self.value)
    }
}

struct TokenProbeBehavior {
    observed_cancelled: AtomicBool,
}

#[async_trait]
impl PipelineBehavior<Ping> for TokenProbeBehavior {
    async fn handle(
        &self,
        _request: &Ping,
        next: Next<'_, i32>,
        cancel: CancellationToken,
    ) -> Result<i32> {
        self.observed_cancelled
            .store(cancel.is_cancelled(), Ordering::SeqCst);
        next().await
    }
}

#[tokio::test]
async fn send_returns_handler_response() {
    init_tracing();
    let handler = Arc::new(PingHandler::new(123));
    let mut registry = HandlerRegistry::new();
    registry.register_request_handler::<Ping>(handler.clone());

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let result = dispatcher
        .send(Ping, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result, 123);
    assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn send_fails_when_no_handler_registered() {
    init_tracing();
    let dispatcher = Dispatcher::new(Arc::new(HandlerRegistry::new()));

    let err = dispatcher
        .send(Ping, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::HandlerNotFound { .. }));
    let message = err.to_string();
    assert!(message.contains("Ping"), "missing request type: {message}");
    assert!(message.contains("i32"), "missing response type: {message}");
}

#[tokio::test]
async fn send_rejects_wrongly_typed_handler_registration() {
    init_tracing();
    // Resolver answers the handler key with something that is not a handler.
    let resolver = FnResolver(|key: &ServiceKey| match key {
        ServiceKey::RequestHandler { .. } => Some(Resolved::Instance(Box::new(7_u8))),
        _ => None,
    });

    let dispatcher = Dispatcher::new(Arc::new(resolver));
    let err = dispatcher
        .send(Ping, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::InvalidConfiguration { .. }));
    assert!(err.to_string().contains("not assignable"));
}

#[tokio::test]
async fn send_rejects_collection_shaped_handler_registration() {
    init_tracing();
    let resolver = FnResolver(|key: &ServiceKey| match key {
        ServiceKey::RequestHandler { .. } => Some(Resolved::Collection(Vec::new())),
        _ => None,
    });

    let dispatcher = Dispatcher::new(Arc::new(resolver));
    let err = dispatcher
        .send(Ping, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::InvalidConfiguration { .. }));
}

#[tokio::test]
async fn send_treats_empty_behavior_collection_as_no_behaviors() {
    init_tracing();
    let handler: Arc<dyn RequestHandler<Ping>> = Arc::new(PingHandler::new(5));
    let resolver = FnResolver(move |key: &ServiceKey| match key {
        ServiceKey::RequestHandler { .. } => {
            Some(Resolved::Instance(Box::new(Arc::clone(&handler))))
        }
        ServiceKey::PipelineBehaviors { .. } => Some(Resolved::Collection(Vec::new())),
        _ => None,
    });

    let dispatcher = Dispatcher::new(Arc::new(resolver));
    let result = dispatcher
        .send(Ping, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result, 5);
}

#[tokio::test]
async fn handler_failure_propagates_untranslated() {
    init_tracing();
    let mut registry = HandlerRegistry::new();
    registry.register_request_handler::<Ping>(Arc::new(FailingHandler));

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let err = dispatcher
        .send(Ping, CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        DispatchError::Handler(inner) => assert_eq!(inner.to_string(), "boom"),
        other => panic!("expected handler failure, got: {other}"),
    }
}

#[tokio::test]
async fn cancellation_token_is_propagated_to_pipeline_and_handler() {
    init_tracing();
    let handler = Arc::new(TokenProbeHandler {
        value: 10,
        observed_cancelled: AtomicBool::new(false),
    });
    let behavior = Arc::new(TokenProbeBehavior {
        observed_cancelled: AtomicBool::new(false),
    });

    let mut registry = HandlerRegistry::new();
    registry.register_request_handler::<Ping>(handler.clone());
    registry.register_behavior::<Ping>(behavior.clone());

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let token = CancellationToken::new();
    token.cancel();

    let result = dispatcher.send(Ping, token).await.unwrap();

    assert_eq!(result, 10);
    assert!(behavior.observed_cancelled.load(Ordering::SeqCst));
    assert!(handler.observed_cancelled.load(Ordering::SeqCst));
}
