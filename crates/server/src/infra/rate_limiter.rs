//! In-process fixed-window request counter.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u64,
}

/// Outcome of a single rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Requests seen in the current window, this one included
    pub count: u64,
    pub allowed: bool,
    /// Seconds until the current window resets
    pub retry_after: u64,
}

/// Counts requests per key within fixed windows.
#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one request for `key` and decide whether it is allowed.
    pub async fn check(&self, key: &str, max_requests: u64, window_seconds: u64) -> RateLimitDecision {
        self.check_at(key, max_requests, window_seconds, Instant::now())
            .await
    }

    async fn check_at(
        &self,
        key: &str,
        max_requests: u64,
        window_seconds: u64,
        now: Instant,
    ) -> RateLimitDecision {
        let window_len = Duration::from_secs(window_seconds);
        let mut windows = self.windows.lock().await;

        // Drop expired windows so the map stays bounded by active clients
        windows.retain(|_, w| now.duration_since(w.started) < window_len);

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        window.count += 1;

        let elapsed = now.duration_since(window.started);
        let retry_after = window_len.saturating_sub(elapsed).as_secs().max(1);

        RateLimitDecision {
            count: window.count,
            allowed: window.count <= max_requests,
            retry_after,
        }
    }
}
