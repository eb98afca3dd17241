use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::AppState;

/// Fixed-window request counter keyed by arbitrary strings.
/// State is per process; replicas do not share limits.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<String, Window>>>,
    max_requests: u32,
    window: Duration,
}

struct Window {
    used: u32,
    opened_at: Instant,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// Count one request against `key`. Returns the requests left in the
    /// window, or how long to wait once it is used up.
    pub async fn hit(&self, key: &str) -> Result<u32, Duration> {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();

        let slot = windows.entry(key.to_owned()).or_insert(Window {
            used: 0,
            opened_at: now,
        });

        let age = now.duration_since(slot.opened_at);
        if age > self.window {
            slot.used = 0;
            slot.opened_at = now;
        } else if slot.used >= self.max_requests {
            return Err(self.window.saturating_sub(age));
        }

        slot.used += 1;
        Ok(self.max_requests - slot.used)
    }

    /// Forget windows that closed more than one window length ago.
    pub async fn prune(&self) -> usize {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        let now = Instant::now();
        let keep_for = self.window * 2;
        windows.retain(|_, w| now.duration_since(w.opened_at) < keep_for);
        before - windows.len()
    }
}

/// Limits /register and /login per client IP and path.
pub async fn limit_by_ip(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = format!("{}:{}", addr.ip(), req.uri().path());

    match state.rate_limiter.hit(&key).await {
        Ok(remaining) => {
            tracing::debug!(key = %key, remaining, "Rate limit check passed");
            Ok(next.run(req).await)
        }
        Err(retry_after) => {
            tracing::warn!(
                key = %key,
                retry_after_secs = retry_after.as_secs(),
                "Rate limit exceeded"
            );
            Err(AppError::RateLimited)
        }
    }
}

pub fn spawn_prune_worker(limiter: RateLimiter) {
    let period = (limiter.window * 5).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let pruned = limiter.prune().await;
            if pruned > 0 {
                tracing::debug!(pruned, "Pruned stale rate limit windows");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(3, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_allows_up_to_max() {
        let limiter = limiter();
        assert_eq!(limiter.hit("k").await, Ok(2));
        assert_eq!(limiter.hit("k").await, Ok(1));
        assert_eq!(limiter.hit("k").await, Ok(0));
    }

    #[tokio::test]
    async fn test_blocks_over_max() {
        let limiter = limiter();
        for _ in 0..3 {
            let _ = limiter.hit("k").await;
        }
        let retry = limiter.hit("k").await.unwrap_err();
        assert!(retry <= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = limiter();
        for _ in 0..3 {
            let _ = limiter.hit("127.0.0.1:/login").await;
        }
        assert!(limiter.hit("127.0.0.1:/register").await.is_ok());
    }

    #[tokio::test]
    async fn test_window_reopens() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.hit("k").await.is_ok());
        assert!(limiter.hit("k").await.is_err());
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(limiter.hit("k").await.is_ok());
    }

    #[tokio::test]
    async fn test_prune_drops_only_stale() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));
        let _ = limiter.hit("old").await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        let _ = limiter.hit("new").await;

        assert_eq!(limiter.prune().await, 1);
        assert!(limiter.hit("new").await.is_err());
    }
}
