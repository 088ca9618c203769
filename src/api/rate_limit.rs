//! Global fixed-window rate limiting.
//!
//! One counter is shared by every inbound request. The window restarts
//! on the first request that arrives after it has elapsed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::warn;

use crate::api::state::AppState;
use crate::api::ApiError;

/// Request counter for the current window.
#[derive(Debug, Clone)]
pub struct FixedWindow {
    max_requests: u32,
    window: Duration,
    window_start: Instant,
    count: u32,
}

impl FixedWindow {
    /// Start a window at `start`.
    pub fn new(max_requests: u32, window: Duration, start: Instant) -> Self {
        Self {
            max_requests,
            window,
            window_start: start,
            count: 0,
        }
    }

    /// Count a request arriving at `now`.
    ///
    /// Returns the requests left in the window, or the time until the
    /// window resets when the budget is spent.
    pub fn check_at(&mut self, now: Instant) -> Result<u32, Duration> {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= self.window {
            self.window_start = now;
            self.count = 0;
        }

        if self.count >= self.max_requests {
            let retry_after = self
                .window
                .saturating_sub(now.saturating_duration_since(self.window_start));
            return Err(retry_after);
        }

        self.count += 1;
        Ok(self.max_requests - self.count)
    }
}

pub type SharedRateLimiter = Arc<Mutex<FixedWindow>>;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Middleware rejecting requests once the window budget is spent.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let decision = state.rate_limiter.lock().await.check_at(Instant::now());

    match decision {
        Ok(remaining) => {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert(REMAINING_HEADER, HeaderValue::from(remaining));
            response
        }
        Err(retry_after) => {
            warn!("Rate limit exceeded on {}", request.uri().path());
            ApiError::RateLimited {
                retry_after_secs: retry_after.as_secs().max(1),
            }
            .into_response()
        }
    }
}
