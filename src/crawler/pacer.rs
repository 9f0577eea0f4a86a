//! Politeness pacing between page requests
//!
//! The walker never sleeps directly; it asks a [`Pacer`] to wait. Production
//! code uses [`TokioPacer`], tests use [`NoDelay`] so walks finish instantly
//! without touching the walker logic.

use async_trait::async_trait;
use std::time::Duration;

/// The wait step performed between two page requests
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits for `delay` before the next request
    async fn pause(&self, delay: Duration);
}

/// Pacer that sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tracing::trace!("Pausing {:?} before next request", delay);
            tokio::time::sleep(delay).await;
        }
    }
}

/// Pacer that returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self, _delay: Duration) {}
}
