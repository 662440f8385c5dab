//! Clock port - time source for the polling loop.

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Monotonic time source plus the fixed-delay timer the live tail waits on.
///
/// Injected so the loop can be driven deterministically in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}
