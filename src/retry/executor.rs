//! The retry loop.

use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::backoff::Backoff;
use crate::error::{Cancelled, Classify, ErrorKind};

/// Runs `operation` until it succeeds, fails permanently, or `backoff` says stop.
///
/// The error of the last attempt is returned as-is. Between attempts the task
/// sleeps for the delay handed out by `backoff`. Cancelling `cancel` drops the
/// in-flight attempt or sleep and returns `E::from(Cancelled)`.
pub async fn retry<B, F, Fut, T, E>(
    mut operation: F,
    backoff: &mut B,
    cancel: &CancellationToken,
) -> Result<T, E>
where
    B: Backoff + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Classify + From<Cancelled> + fmt::Display,
{
    loop {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(E::from(Cancelled)),
            outcome = operation() => outcome,
        };

        let error = match outcome {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if error.kind() == ErrorKind::Permanent {
            debug!("non-retryable error: {}", error);
            return Err(error);
        }

        let Some(delay) = backoff.next_backoff() else {
            debug!("giving up after {} retries: {}", backoff.attempt(), error);
            return Err(error);
        };

        info!("Retrying in {:?} ({})", delay, error);
        debug!("Remaining retries: {}", backoff.remaining_retries());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(E::from(Cancelled)),
            _ = tokio::time::sleep(delay) => {}
        }
    }
}
