use std::{
    future::Future,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

/// Source of time for the rate limiter.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Wall clock backed by tokio's timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

/// Enforces a minimum interval between consecutive permits.
///
/// The first permit is granted immediately. Every later one waits until
/// `min_interval` has passed since the previous permit was granted.
///
/// Unlike a fixed sleep before every call, the very first request of a run
/// (the first artist lookup) goes out without delay. Spacing between any two
/// requests is still at least `min_interval`.
pub struct RateLimiter<C: Clock = TokioClock> {
    clock: C,
    min_interval: Duration,
    last_permit: Mutex<Option<Instant>>,
}

impl RateLimiter<TokioClock> {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, TokioClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(min_interval: Duration, clock: C) -> Self {
        Self {
            clock,
            min_interval,
            last_permit: Mutex::new(None),
        }
    }

    /// Waits for the next permit and returns how long it waited.
    pub async fn wait(&self) -> Duration {
        let mut last = self.last_permit.lock().await;

        let mut waited = Duration::ZERO;
        if let Some(last_time) = *last {
            let elapsed = self.clock.now().saturating_duration_since(last_time);
            if elapsed < self.min_interval {
                waited = self.min_interval - elapsed;
                self.clock.sleep(waited).await;
            }
        }

        *last = Some(self.clock.now());
        waited
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
