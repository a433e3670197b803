//! Injectable delay used to simulate backend latency.

use std::time::Duration;

use async_trait::async_trait;

/// Source of artificial delay.
///
/// The mock backend awaits this instead of blocking a worker thread, so the
/// wait is cancellable and tests can swap it out.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Real delay on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleep;

#[async_trait]
impl Latency for TokioSleep {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn wait(&self, _duration: Duration) {}
}
