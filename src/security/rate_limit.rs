//! Rate limiting middleware for request admission.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::RateLimitConfig;
use crate::observability::metrics;

/// A fixed-window request counter.
struct FixedWindow {
    started: Instant,
    count: u32,
}

impl FixedWindow {
    fn new(now: Instant) -> Self {
        Self {
            started: now,
            count: 0,
        }
    }

    fn try_acquire(&mut self, limit: u32, window: Duration) -> bool {
        let now = Instant::now();
        if now.duration_since(self.started) >= window {
            self.started = now;
            self.count = 0;
        }

        if self.count < limit {
            self.count += 1;
            true
        } else {
            false
        }
    }
}

/// Shared admission state: one counting window per scope/client pair.
///
/// The mutex makes the check-and-increment atomic, so concurrent requests
/// from one client cannot undercount.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, FixedWindow>>,
    window: Duration,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window: Duration::from_secs(config.window_secs),
            enabled: config.enabled,
        }
    }

    /// Admit or reject one request from `client` under `scope`.
    ///
    /// Rejection is cheap and leaves no state behind beyond the counter.
    pub fn try_admit(&self, scope: &str, client: &str, limit: u32) -> bool {
        if !self.enabled {
            return true;
        }

        let key = format!("{scope}:{client}");
        let window = self.window;
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        windows
            .entry(key)
            .or_insert_with(|| FixedWindow::new(Instant::now()))
            .try_acquire(limit, window)
    }
}

/// Per-scope middleware state.
#[derive(Clone)]
pub struct RateLimitScope {
    pub limiter: Arc<RateLimiter>,
    pub scope: &'static str,
    pub limit: u32,
}

/// Middleware rejecting requests over the scope's per-window limit.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<RateLimitScope>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = addr.ip().to_string();

    if state.limiter.try_admit(state.scope, &client, state.limit) {
        next.run(request).await
    } else {
        tracing::warn!(client = %client, scope = state.scope, "Rate limit exceeded");
        metrics::record_rate_limited(state.scope);
        let mut response = Response::new(Body::from("Rate limit exceeded"));
        *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(window_secs: u64) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            enabled: true,
            window_secs,
            service_per_window: 10,
            chat_per_window: 5,
        })
    }

    #[test]
    fn admits_up_to_limit_then_rejects() {
        let limiter = limiter(60);
        for _ in 0..5 {
            assert!(limiter.try_admit("chat", "10.0.0.1", 5));
        }
        assert!(!limiter.try_admit("chat", "10.0.0.1", 5));
    }

    #[test]
    fn window_elapsing_admits_again() {
        let limiter = limiter(1);
        assert!(limiter.try_admit("chat", "10.0.0.1", 1));
        assert!(!limiter.try_admit("chat", "10.0.0.1", 1));

        std::thread::sleep(Duration::from_millis(1100));
        assert!(limiter.try_admit("chat", "10.0.0.1", 1));
    }

    #[test]
    fn clients_are_counted_independently() {
        let limiter = limiter(60);
        assert!(limiter.try_admit("chat", "10.0.0.1", 1));
        assert!(!limiter.try_admit("chat", "10.0.0.1", 1));
        assert!(limiter.try_admit("chat", "10.0.0.2", 1));
    }

    #[test]
    fn scopes_are_counted_independently() {
        let limiter = limiter(60);
        assert!(limiter.try_admit("chat", "10.0.0.1", 1));
        assert!(!limiter.try_admit("chat", "10.0.0.1", 1));
        assert!(limiter.try_admit("service", "10.0.0.1", 1));
    }

    #[test]
    fn disabled_limiter_admits_everything() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            enabled: false,
            window_secs: 60,
            service_per_window: 1,
            chat_per_window: 1,
        });
        for _ in 0..20 {
            assert!(limiter.try_admit("chat", "10.0.0.1", 1));
        }
    }
}
