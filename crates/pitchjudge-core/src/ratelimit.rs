//! Process-global rate limiters shared by every orchestrator task.
//!
//! Grounded on the `OnceLock`-guarded singleton-init pattern used for the
//! Pdfium library handle in the teacher's `docling-backend::pdfium_adapter`
//! (there guarding a non-reentrant C library init; here guarding a shared
//! clock). Each limiter holds `{min_interval, last_ts, mutex}` and is
//! initialized once on first access; it lives for the process duration and
//! is torn down only at exit.

use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

/// A single rate limiter gate: at most one `acquire` completes per
/// `min_interval`.
pub struct RateLimiter {
    min_interval: Duration,
    last_ts: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = requests_per_minute.max(1);
        Self {
            min_interval: Duration::from_secs_f64(60.0 / rpm as f64),
            last_ts: Mutex::new(None),
        }
    }

    /// Sleeps until `min_interval` has elapsed since the previous
    /// completed `acquire`, then records the new dispatch time.
    pub async fn acquire(&self) {
        let wait = {
            let mut guard = self.last_ts.lock().expect("rate limiter mutex poisoned");
            let now = Instant::now();
            let wait = match *guard {
                Some(prev) => {
                    let elapsed = now.duration_since(prev);
                    self.min_interval.saturating_sub(elapsed)
                }
                None => Duration::ZERO,
            };
            *guard = Some(now + wait);
            wait
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}

static TEXT_LIMITER: OnceLock<RateLimiter> = OnceLock::new();
static VISION_LIMITER: OnceLock<RateLimiter> = OnceLock::new();

/// The text-agent rate limiter, initialized on first access from
/// `RATE_LIMIT_RPM_TEXT` (default 18).
pub fn text_limiter() -> &'static RateLimiter {
    TEXT_LIMITER.get_or_init(|| {
        let rpm = std::env::var("RATE_LIMIT_RPM_TEXT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(18);
        RateLimiter::new(rpm)
    })
}

/// The vision-agent rate limiter, initialized on first access from
/// `RATE_LIMIT_RPM_VISION` (default 6).
pub fn vision_limiter() -> &'static RateLimiter {
    VISION_LIMITER.get_or_init(|| {
        let rpm = std::env::var("RATE_LIMIT_RPM_VISION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(6);
        RateLimiter::new(rpm)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_spaces_calls_by_min_interval() {
        let limiter = RateLimiter::new(600); // 100ms interval
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(190));
    }
}
