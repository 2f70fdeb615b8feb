//! Failure taxonomy: construction-time config errors and execution failures.

use thiserror::Error;

/// Policy field out of range. Raised when a policy is built, never while an
/// operation is running; an invalid policy must not reach the retry loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `max_attempts` counts the first attempt too, so it must be at least 1.
    #[error("max_attempts must be at least 1, but was {0}")]
    MaxAttempts(u32),
    /// An empty inclusion set would never retry anything.
    #[error("inclusion set is empty; specify at least one failure kind to retry on")]
    EmptyInclude,
    /// Delay arrives as signed milliseconds from config layers.
    #[error("initial delay must be non-negative, but was {0} ms")]
    NegativeDelay(i64),
    /// Rejects NaN and negative multipliers. Values in [0, 1) are legal and
    /// yield a shrinking or zeroed delay sequence.
    #[error("multiplier must be a non-negative number, but was {0}")]
    Multiplier(f64),
}

/// Terminal outcome of a retry run that did not produce a success.
///
/// The original operation failure travels as the `source` of the first two
/// variants; only the most recent failure is kept on exhaustion, earlier ones
/// are discarded. `Interrupted` deliberately carries no operation failure:
/// the cancellation itself is what the caller needs to see.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The failure kind is not in the policy's inclusion set. Propagated on
    /// the first occurrence, however many attempts remained.
    #[error("non-retryable failure: {0}")]
    NotRetryable(#[source] E),
    /// A retryable failure on the final permitted attempt.
    #[error("retries exhausted after {attempts} attempt(s): {source}")]
    Exhausted {
        /// Total attempts made (equals the policy's budget).
        attempts: u32,
        /// The last failure observed.
        #[source]
        source: E,
    },
    /// The backoff wait between attempts was cancelled.
    #[error("retry interrupted after {attempts} attempt(s)")]
    Interrupted {
        /// Attempts completed before the wait was cancelled.
        attempts: u32,
    },
}

impl<E> RetryError<E> {
    /// The operation's own failure, where one was recorded.
    pub fn into_inner(self) -> Option<E> {
        match self {
            RetryError::NotRetryable(e) => Some(e),
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::Interrupted { .. } => None,
        }
    }

    /// Attempts completed when the run ended, where the variant tracks it.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            RetryError::NotRetryable(_) => None,
            RetryError::Exhausted { attempts, .. } | RetryError::Interrupted { attempts } => {
                Some(*attempts)
            }
        }
    }
}
