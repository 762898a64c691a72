//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Scale `delay` by `0.5 + sample`, with `sample` in `[0, 1)`.
///
/// The result lies in `[0.5 * delay, 1.5 * delay)`.
pub fn apply_jitter(delay: Duration, sample: f64) -> Duration {
    delay.mul_f64(0.5 + sample.clamp(0.0, 1.0))
}

/// Jitter `delay` with a fresh random sample.
pub fn jittered(delay: Duration) -> Duration {
    apply_jitter(delay, rand::thread_rng().gen::<f64>())
}

/// Per-run delay schedule: doubles after every sleep, capped at `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            max,
            current: initial,
        }
    }

    /// Delay before jitter for the upcoming sleep.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Jittered delay for the upcoming sleep; grows the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let delay = jittered(self.current);
        self.advance();
        delay
    }

    /// Grow the base delay: `min(2 * current, max)`.
    pub fn advance(&mut self) {
        self.current = self.current.saturating_mul(2).min(self.max);
    }
}
