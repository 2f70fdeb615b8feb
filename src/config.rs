//! Resolved retry configuration as handed over by a binding layer
//! (config file, CLI flags, service defaults).
//!
//! This is plain data: it carries the numeric knobs only. The inclusion set
//! is made of types and predicates, so it is supplied in code when the
//! config is turned into a policy builder.

use crate::policy::RetryPolicyBuilder;
use serde::{Deserialize, Serialize};

/// Retry knobs with the documented defaults (3 attempts, 1000 ms, x1.0).
///
/// `initial_delay_ms` is signed on purpose: values come in unvalidated and a
/// negative delay must surface as a distinct config error at policy build
/// time, not be silently clamped here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first.
    pub max_attempts: u32,
    /// Wait before the second attempt, in milliseconds.
    pub initial_delay_ms: i64,
    /// Factor applied to the delay after each retry.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            multiplier: 1.0,
        }
    }
}

impl RetryConfig {
    /// Seed a policy builder with these values. The inclusion set must still
    /// be added before `build()` succeeds.
    pub fn to_policy_builder<E>(&self) -> RetryPolicyBuilder<E> {
        RetryPolicyBuilder::new()
            .max_attempts(self.max_attempts)
            .initial_delay_ms(self.initial_delay_ms)
            .multiplier(self.multiplier)
    }
}
