//! Minimum-interval throttle for outbound generation calls

use crate::config::constants::defaults;
use std::time::Duration;
use tokio::time::Instant;

/// Enforces a flat minimum interval between outbound calls.
///
/// Uses tokio's clock so tests can pause and advance time.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Option<Instant>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(defaults::DEFAULT_MIN_INTERVAL_MS))
    }
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn last_call(&self) -> Option<Instant> {
        self.last_call
    }

    /// Time left before the next call may start
    pub fn remaining(&self) -> Duration {
        self.last_call
            .map(|last| self.min_interval.saturating_sub(last.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Sleep until at least `min_interval` has passed since the last recorded call
    pub async fn await_slot(&self) {
        let wait_time = self.remaining();
        if !wait_time.is_zero() {
            tracing::debug!(wait_ms = wait_time.as_millis() as u64, "rate limit: waiting for slot");
            tokio::time::sleep(wait_time).await;
        }
    }

    /// Stamp the completion of an outbound call
    pub fn record_call(&mut self) {
        self.last_call = Some(Instant::now());
    }
}
