use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use brrtbus::{
    Dispatcher, HandlerRegistry, Next, Notification, NotificationHandler, PipelineBehavior,
    Request, RequestHandler,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio_util::sync::CancellationToken;

struct Ping;

impl Request for Ping {
    type Response = i32;
}

struct PingHandler;

#[async_trait]
impl RequestHandler<Ping> for PingHandler {
    async fn handle(&self, _request: &Ping, _cancel: CancellationToken) -> Result<i32> {
        Ok(1)
    }
}

struct ForwardingBehavior;

#[async_trait]
impl PipelineBehavior<Ping> for ForwardingBehavior {
    async fn handle(
        &self,
        _request: &Ping,
        next: Next<'_, i32>,
        _cancel: CancellationToken,
    ) -> Result<i32> {
        next().await
    }
}

struct Tick;

impl Notification for Tick {}

struct TickHandler;

#[async_trait]
impl NotificationHandler<Tick> for TickHandler {
    async fn handle(&self, _notification: &Tick, _cancel: CancellationToken) -> Result<()> {
        Ok(())
    }
}

fn dispatcher_with_behaviors(count: usize) -> Dispatcher {
    let mut registry = HandlerRegistry::new();
    registry.register_request_handler::<Ping>(Arc::new(PingHandler));
    for _ in 0..count {
        registry.register_behavior::<Ping>(Arc::new(ForwardingBehavior));
    }
    Dispatcher::new(Arc::new(registry))
}

fn bench_send_throughput(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let bare = dispatcher_with_behaviors(0);
    let wrapped = dispatcher_with_behaviors(4);
    let cancel = CancellationToken::new();

    c.bench_function("send_no_behaviors", |b| {
        b.iter(|| {
            let value = rt.block_on(bare.send(Ping, cancel.clone())).expect("send");
            black_box(value)
        })
    });

    c.bench_function("send_four_behaviors", |b| {
        b.iter(|| {
            let value = rt
                .block_on(wrapped.send(Ping, cancel.clone()))
                .expect("send");
            black_box(value)
        })
    });
}

fn bench_publish_fanout(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut registry = HandlerRegistry::new();
    registry.register_notification_handler::<Tick>(Arc::new(TickHandler));
    registry.register_notification_handler::<Tick>(Arc::new(TickHandler));
    let dispatcher = Dispatcher::new(Arc::new(registry));
    let cancel = CancellationToken::new();

    c.bench_function("publish_two_handlers", |b| {
        b.iter(|| {
            rt.block_on(dispatcher.publish(Tick, cancel.clone()))
                .expect("publish")
        })
    });
}

criterion_group!(benches, bench_send_throughput, bench_publish_fanout);
criterion_main!(benches);
