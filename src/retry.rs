//! Retry logic for account operations: exponential backoff with jitter and a
//! cancellable retry loop driven by error classification.

mod backoff;
mod executor;

pub use backoff::{
    Backoff, DEFAULT_INITIAL_DELAY, DEFAULT_MAX_ELAPSED_TIME, DEFAULT_MAX_RETRIES,
    DEFAULT_MULTIPLIER, DEFAULT_RANDOM_FACTOR, ExponentialBackoff,
};
pub use executor::retry;

#[cfg(test)]
pub use backoff::MockBackoff;
