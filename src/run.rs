//! Retry loop: drive an operation until success, a terminal failure, or an
//! exhausted attempt budget.
//!
//! The wait between attempts is a cooperative tokio sleep, so it suspends
//! only the calling task. The cancellable variant races the sleep against a
//! [`CancellationToken`] and fails fast with `RetryError::Interrupted` when
//! the token fires; cancellation during the operation itself is the
//! operation's own responsibility.

use crate::error::RetryError;
use crate::policy::{RetryDecision, RetryPolicy};
use std::error::Error;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Runs `op` until it succeeds or the policy says to stop. On a retryable
/// failure, sleeps for the backoff delay and tries again.
///
/// Attempts are strictly sequential; the loop holds no state beyond its own
/// attempt counter, so concurrent runs are fully independent.
pub async fn run_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy<E>,
    op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Error + 'static,
{
    run(policy, op, None).await
}

/// Like [`run_with_retry`], but the backoff wait terminates early when
/// `cancel` fires, returning `RetryError::Interrupted` with the number of
/// attempts completed so far.
pub async fn run_with_retry_cancellable<T, E, F, Fut>(
    policy: &RetryPolicy<E>,
    op: F,
    cancel: &CancellationToken,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Error + 'static,
{
    run(policy, op, Some(cancel)).await
}

async fn run<T, E, F, Fut>(
    policy: &RetryPolicy<E>,
    mut op: F,
    cancel: Option<&CancellationToken>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Error + 'static,
{
    // `attempt` is the 1-based number of the attempt that just ran.
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(failure) => match policy.decide(attempt, &failure) {
                RetryDecision::Abort => return Err(RetryError::NotRetryable(failure)),
                RetryDecision::GiveUp => {
                    tracing::warn!(attempts = attempt, error = %failure, "retries exhausted");
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        source: failure,
                    });
                }
                RetryDecision::RetryAfter(delay) => {
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure,
                        "retrying after backoff"
                    );
                    match cancel {
                        Some(token) => {
                            tokio::select! {
                                biased;
                                _ = token.cancelled() => {
                                    return Err(RetryError::Interrupted { attempts: attempt });
                                }
                                _ = tokio::time::sleep(delay) => {}
                            }
                        }
                        None => tokio::time::sleep(delay).await,
                    }
                    attempt += 1;
                }
            },
        }
    }
}
