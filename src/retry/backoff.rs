//! Exponential backoff policy.

use rand::Rng;
use std::time::Duration;

/// Upper bound for a single computed delay.
pub const DEFAULT_MAX_ELAPSED_TIME: Duration = Duration::from_secs(5 * 60);

/// Maximum number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Delay before the first retry.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::ZERO;

/// Growth factor applied per attempt.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Relative jitter applied to every delay.
pub const DEFAULT_RANDOM_FACTOR: f64 = 0.1;

/// A stateful backoff strategy consulted between attempts.
///
/// `next_backoff` returns `None` once the strategy wants the caller to stop.
#[cfg_attr(test, mockall::automock)]
pub trait Backoff: Send {
    /// Number of delays handed out since construction or the last reset.
    fn attempt(&self) -> u32;

    /// Advances the strategy and returns the delay to wait before the next attempt.
    fn next_backoff(&mut self) -> Option<Duration>;

    /// Returns the strategy to its initial state.
    fn reset(&mut self);

    /// Delays still available before the strategy stops on the retry limit.
    fn remaining_retries(&self) -> u32;
}

/// Exponential backoff: `initial_delay * multiplier^(attempt - 1)` with
/// symmetric jitter of `random_factor`.
///
/// Two conditions stop it: `max_retries` delays have been handed out, or a
/// computed delay exceeds `max_elapsed_time`. Both are reported the same way
/// (`None`), so callers cannot tell them apart.
///
/// The state is not synchronized. Use one instance per logical operation
/// (clone the configured policy) instead of sharing it between tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoff {
    max_elapsed_time: Duration,
    max_retries: u32,
    initial_delay: Duration,
    multiplier: f64,
    random_factor: f64,
    attempt: u32,
    remaining_retries: u32,
}

impl ExponentialBackoff {
    /// Creates a policy. Any zero-valued parameter is replaced by its default.
    pub fn new(
        max_elapsed_time: Duration,
        max_retries: u32,
        initial_delay: Duration,
        multiplier: f64,
        random_factor: f64,
    ) -> Self {
        let max_elapsed_time = if max_elapsed_time.is_zero() {
            DEFAULT_MAX_ELAPSED_TIME
        } else {
            max_elapsed_time
        };
        let max_retries = if max_retries == 0 {
            DEFAULT_MAX_RETRIES
        } else {
            max_retries
        };
        let initial_delay = if initial_delay.is_zero() {
            DEFAULT_INITIAL_DELAY
        } else {
            initial_delay
        };
        let multiplier = if multiplier == 0.0 {
            DEFAULT_MULTIPLIER
        } else {
            multiplier
        };
        let random_factor = if random_factor == 0.0 {
            DEFAULT_RANDOM_FACTOR
        } else {
            random_factor
        };

        Self {
            max_elapsed_time,
            max_retries,
            initial_delay,
            multiplier,
            random_factor,
            attempt: 0,
            remaining_retries: max_retries,
        }
    }

    pub fn max_elapsed_time(&self) -> Duration {
        self.max_elapsed_time
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn random_factor(&self) -> f64 {
        self.random_factor
    }

    /// Advances one attempt using `spread` (in `[-1, 1]`) as the jitter sample.
    fn advance(&mut self, spread: f64) -> Option<Duration> {
        if self.attempt >= self.max_retries {
            return None;
        }

        self.attempt += 1;
        self.remaining_retries = self.remaining_retries.saturating_sub(1);

        let exponent = f64::from(self.attempt - 1);
        let backoff = self.initial_delay.as_secs_f64() * self.multiplier.powf(exponent);
        let delay = jittered(backoff, self.random_factor, spread);

        if delay > self.max_elapsed_time.as_secs_f64() {
            return None;
        }

        // Only fails when the value rounds past Duration::MAX.
        Duration::try_from_secs_f64(delay).ok()
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(Duration::ZERO, 0, Duration::ZERO, 0.0, 0.0)
    }
}

impl Backoff for ExponentialBackoff {
    fn attempt(&self) -> u32 {
        self.attempt
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        let spread = rand::thread_rng().gen_range(-1.0..=1.0);
        self.advance(spread)
    }

    fn reset(&mut self) {
        self.attempt = 0;
        self.remaining_retries = self.max_retries;
    }

    fn remaining_retries(&self) -> u32 {
        self.remaining_retries
    }
}

/// Applies jitter to `backoff` seconds, flooring the result at zero.
///
/// An out-of-range `random_factor` (negative or above 1) can push the delay
/// below zero; NaN from degenerate inputs is treated the same way.
fn jittered(backoff: f64, random_factor: f64, spread: f64) -> f64 {
    let delay = backoff + backoff * random_factor * spread;
    if delay > 0.0 { delay } else { 0.0 }
}
