//! Resilience policies for the informational endpoints.
//!
//! Policy only: a bounded retry with jittered backoff and a token-bucket
//! rate limiter. Neither carries data-correctness implications; callers fall
//! back to a static value when a policy gives up, so the endpoints they
//! guard never surface an error.

use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Bounded retry with jittered exponential backoff.
#[derive(Debug, Clone)]
pub struct Retry {
    max_attempts: u32,
    base_delay: Duration,
}

impl Retry {
    /// Create a policy with the given attempt bound and a 100 ms base
    /// delay.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(100),
        }
    }

    /// Set the base delay used for the backoff schedule.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential schedule capped at 2^8 to keep the multiplication in
        // range for any attempt bound.
        let exponent = attempt.saturating_sub(1).min(8);
        let step = self.base_delay.saturating_mul(1 << exponent);
        let jitter_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let mut rng = SmallRng::from_entropy();
        step + Duration::from_millis(rng.gen_range(0..=jitter_ms))
    }

    /// Run the operation until it succeeds or the attempt bound is reached,
    /// returning the last error on exhaustion.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= self.max_attempts {
                        return Err(error);
                    }
                    tokio::time::sleep(self.backoff_delay(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[derive(Debug)]
struct BucketState {
    tokens: u32,
    last_refill: Instant,
}

/// Token-bucket rate limiter.
///
/// The bucket starts full and refills to capacity once per refill period.
/// Rejected calls are the caller's cue to answer with a fallback value.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    refill_period: Duration,
    state: Mutex<BucketState>,
}

impl RateLimiter {
    /// Create a limiter allowing `capacity` calls per `refill_period`.
    pub fn new(capacity: u32, refill_period: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            refill_period,
            state: Mutex::new(BucketState {
                tokens: capacity.max(1),
                last_refill: Instant::now(),
            }),
        }
    }

    /// Take a token if one is available.
    pub fn try_acquire(&self) -> bool {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let now = Instant::now();
        if now.duration_since(state.last_refill) >= self.refill_period {
            state.tokens = self.capacity;
            state.last_refill = now;
        }

        if state.tokens > 0 {
            state.tokens -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn retry_returns_the_first_success() {
        let retry = Retry::new(3).with_base_delay(Duration::from_millis(1));
        let attempts = AtomicU32::new(0);

        let result: Result<u32, &str> = retry
            .run(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Ok(42) }
            })
            .await;

        assert_eq!(result, Ok(42));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_recovers_from_transient_failures() {
        let retry = Retry::new(3).with_base_delay(Duration::from_millis(1));
        let attempts = AtomicU32::new(0);

        let result: Result<u32, &str> = retry
            .run(|| {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt < 3 {
                        Err("transient")
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(7));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_gives_up_after_the_attempt_bound() {
        let retry = Retry::new(3).with_base_delay(Duration::from_millis(1));
        let attempts = AtomicU32::new(0);

        let result: Result<u32, &str> = retry
            .run(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err("permanent") }
            })
            .await;

        assert_eq!(result, Err("permanent"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    fn limiter_rejects_once_the_bucket_is_empty() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));

        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[rstest]
    fn limiter_refills_after_the_period() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));

        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());

        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.try_acquire());
    }
}
