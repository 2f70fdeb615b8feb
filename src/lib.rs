//! Bounded retry with exponential backoff.
//!
//! A validated [`RetryPolicy`] describes the attempt budget, the backoff
//! schedule, and the set of failure kinds worth retrying. [`run_with_retry`]
//! drives the attempt loop for a fallible async operation; [`Retryable`]
//! binds a policy to one operation up front so call sites stay free of
//! retry plumbing.
//!
//! Wrapped operations should be idempotent: they may run more than once.

pub mod config;
pub mod error;
pub mod matcher;
pub mod policy;
pub mod run;
pub mod wrap;

pub use config::RetryConfig;
pub use error::{ConfigError, RetryError};
pub use matcher::{chain_contains, failure_kind, FailureMatcher};
pub use policy::{RetryDecision, RetryPolicy, RetryPolicyBuilder};
pub use run::{run_with_retry, run_with_retry_cancellable};
pub use wrap::Retryable;
