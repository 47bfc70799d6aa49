// src/integrations/wikipedia/rate_limiter.rs
//
// Shared request pacing for every outbound Wikipedia call.
//
// One limiter is constructed per process and injected wherever requests are
// issued; acquire() must be awaited before each request.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[cfg(test)]
use mockall::automock;

/// Blocks the caller until it is safe to issue the next request.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn acquire(&self);
}

/// Minimum-interval limiter: consecutive acquisitions are spaced by at
/// least `min_interval`, measured from the previous acquisition.
pub struct IntervalRateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl IntervalRateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }
}

#[async_trait]
impl RateLimiter for IntervalRateLimiter {
    async fn acquire(&self) {
        // Held across the sleep so concurrent callers queue up in order
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_does_not_wait() {
        let limiter = IntervalRateLimiter::new(Duration::from_millis(500));
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_acquires_are_spaced() {
        let limiter = IntervalRateLimiter::new(Duration::from_millis(500));
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_elapsed() {
        let limiter = IntervalRateLimiter::new(Duration::from_millis(200));
        limiter.acquire().await;
        tokio::time::sleep(Duration::from_millis(300)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert!(before.elapsed() < Duration::from_millis(200));
    }
}
