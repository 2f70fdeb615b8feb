//! Retry policy: validated attempt budget, backoff schedule, inclusion set.

use crate::error::ConfigError;
use crate::matcher::{failure_kind, FailureMatcher};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Decision returned by the retry policy for one failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Failure kind not in the inclusion set; propagate it immediately.
    Abort,
    /// Attempt budget consumed; propagate the last failure.
    GiveUp,
    /// Retry after waiting for the given delay.
    RetryAfter(Duration),
}

/// Immutable description of retry behaviour for failures of type `E`.
///
/// Built once per call site via [`RetryPolicy::builder`]; construction
/// validates every field, so a policy in hand is always valid. A failure is
/// retryable iff at least one matcher in the inclusion set accepts it.
pub struct RetryPolicy<E> {
    max_attempts: u32,
    initial_delay: Duration,
    multiplier: f64,
    include: Vec<FailureMatcher<E>>,
}

impl<E> fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("initial_delay", &self.initial_delay)
            .field("multiplier", &self.multiplier)
            .field("include", &self.include.len())
            .finish()
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            initial_delay: self.initial_delay,
            multiplier: self.multiplier,
            include: self.include.clone(),
        }
    }
}

impl<E> RetryPolicy<E> {
    pub fn builder() -> RetryPolicyBuilder<E> {
        RetryPolicyBuilder::new()
    }

    /// Total attempts including the first (not retries on top of one).
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the second attempt.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// True iff the failure matches at least one entry of the inclusion set.
    pub fn is_retryable(&self, failure: &E) -> bool {
        self.include.iter().any(|m| m(failure))
    }

    /// Wait before attempt `attempt + 1`, for 1-based `attempt`:
    /// `initial_delay * multiplier^(attempt - 1)`, saturating at
    /// `Duration::MAX` rather than overflowing.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exp);
        if secs.is_finite() {
            Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
        } else {
            Duration::MAX
        }
    }

    /// Decide what to do after attempt `attempt` (1-based) failed with
    /// `failure`. Non-retryable failures abort regardless of how many
    /// attempts remain.
    pub fn decide(&self, attempt: u32, failure: &E) -> RetryDecision {
        if !self.is_retryable(failure) {
            return RetryDecision::Abort;
        }
        if attempt >= self.max_attempts {
            return RetryDecision::GiveUp;
        }
        RetryDecision::RetryAfter(self.delay_for(attempt))
    }
}

/// Builder for [`RetryPolicy`]. Defaults: 3 attempts, 1000 ms initial delay,
/// multiplier 1.0. The inclusion set has no default and must be non-empty.
pub struct RetryPolicyBuilder<E> {
    max_attempts: u32,
    initial_delay_ms: i64,
    multiplier: f64,
    include: Vec<FailureMatcher<E>>,
}

impl<E> Default for RetryPolicyBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RetryPolicyBuilder<E> {
    pub fn new() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            multiplier: 1.0,
            include: Vec::new(),
        }
    }

    /// Total attempts including the first. Must be at least 1.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Wait before the second attempt.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay_ms = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
        self
    }

    /// Raw millisecond form, for binding layers handing over unchecked config
    /// values. Negative values are rejected at `build()`.
    pub fn initial_delay_ms(mut self, delay_ms: i64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    /// Factor applied to the delay after each retry. 1.0 keeps it constant;
    /// 0 collapses every delay after the first to zero.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Add failure type `K` to the inclusion set; matches `K` anywhere in a
    /// failure's `source()` chain.
    pub fn retry_on<K>(mut self) -> Self
    where
        K: Error + 'static,
        E: Error + 'static,
    {
        self.include.push(failure_kind::<K, E>());
        self
    }

    /// Add an arbitrary predicate to the inclusion set (e.g. matching on an
    /// error enum's variant).
    pub fn retry_if<P>(mut self, pred: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.include.push(Arc::new(pred));
        self
    }

    /// Validate and build. Each out-of-range field reports its own
    /// [`ConfigError`] variant.
    pub fn build(self) -> Result<RetryPolicy<E>, ConfigError> {
        if self.max_attempts < 1 {
            return Err(ConfigError::MaxAttempts(self.max_attempts));
        }
        if self.include.is_empty() {
            return Err(ConfigError::EmptyInclude);
        }
        if self.initial_delay_ms < 0 {
            return Err(ConfigError::NegativeDelay(self.initial_delay_ms));
        }
        if !(self.multiplier >= 0.0) {
            return Err(ConfigError::Multiplier(self.multiplier));
        }
        Ok(RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms as u64),
            multiplier: self.multiplier,
            include: self.include,
        })
    }
}
