use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

use crate::error::Error;

/// Keeps at least `min_interval` between the end of one request and the
/// start of the next, and tracks the quota GitHub reports in its
/// `x-ratelimit-*` headers.
pub struct RateLimiter {
    min_interval: Duration,
    state: Arc<Mutex<RateLimitState>>,
}

#[derive(Debug, Default)]
struct RateLimitState {
    last_activity: Option<Instant>,
    remaining: Option<u64>,
    reset_epoch: Option<u64>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            state: Arc::new(Mutex::new(RateLimitState::default())),
        }
    }

    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        if let Some(last) = state.last_activity {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::trace!("Pacing request, waiting {:?}", wait_time);
                sleep(wait_time).await;
            }
        }

        state.last_activity = Some(Instant::now());
    }

    /// Marks the request as finished, restarting the pause before the next
    /// one, and records the quota headers.
    pub async fn record_response(&self, headers: &HeaderMap) {
        let remaining = header_u64(headers, "x-ratelimit-remaining");
        let reset = header_u64(headers, "x-ratelimit-reset");

        let mut state = self.state.lock().await;
        state.last_activity = Some(Instant::now());
        if let Some(remaining) = remaining {
            state.remaining = Some(remaining);
            if remaining < 10 {
                tracing::warn!("GitHub rate limit nearly exhausted: {} requests left", remaining);
            }
        }
        if reset.is_some() {
            state.reset_epoch = reset;
        }
    }

    pub async fn remaining(&self) -> Option<u64> {
        self.state.lock().await.remaining
    }

    /// Seconds until the reported quota resets, if GitHub told us.
    pub async fn reset_in(&self) -> Option<u64> {
        self.state
            .lock()
            .await
            .reset_epoch
            .map(|reset| reset.saturating_sub(now_epoch()))
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn now_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Returns `Error::RateLimited` when the response signals an exhausted quota:
/// any 429, or a 403 carrying `x-ratelimit-remaining: 0`.
pub fn rate_limit_error(status: StatusCode, headers: &HeaderMap) -> Option<Error> {
    let exhausted = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && header_u64(headers, "x-ratelimit-remaining") == Some(0));
    if !exhausted {
        return None;
    }

    let retry_after = header_u64(headers, "retry-after").or_else(|| {
        header_u64(headers, "x-ratelimit-reset").map(|reset| reset.saturating_sub(now_epoch()))
    });

    Some(Error::RateLimited(retry_after.unwrap_or(60)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_exhausted_forbidden_is_rate_limited() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        let reset = (now_epoch() + 120).to_string();
        headers.insert("x-ratelimit-reset", HeaderValue::from_str(&reset).unwrap());

        match rate_limit_error(StatusCode::FORBIDDEN, &headers) {
            Some(Error::RateLimited(secs)) => assert!(secs > 100 && secs <= 120),
            other => panic!("expected rate limit error, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_forbidden_is_not_rate_limited() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("42"));
        assert!(rate_limit_error(StatusCode::FORBIDDEN, &headers).is_none());
        assert!(rate_limit_error(StatusCode::OK, &HeaderMap::new()).is_none());
    }

    #[test]
    fn test_too_many_requests_honours_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("7"));
        assert!(matches!(
            rate_limit_error(StatusCode::TOO_MANY_REQUESTS, &headers),
            Some(Error::RateLimited(7))
        ));
    }

    #[tokio::test]
    async fn test_wait_spaces_requests() {
        let limiter = RateLimiter::new(Duration::from_millis(20));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_pause_counts_from_response() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        limiter.wait().await;
        sleep(Duration::from_millis(60)).await;
        limiter.record_response(&HeaderMap::new()).await;

        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_record_response_keeps_large_quota() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("5000000000"));
        limiter.record_response(&headers).await;
        assert_eq!(limiter.remaining().await, Some(5_000_000_000));
    }
}
