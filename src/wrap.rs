//! Explicit decorator: bind a policy to one operation up front.
//!
//! `Retryable` is the composition-style replacement for attaching retry
//! behaviour declaratively: build it once where the operation is defined,
//! then call it exactly like the bare operation.

use crate::error::RetryError;
use crate::policy::RetryPolicy;
use crate::run::{run_with_retry, run_with_retry_cancellable};
use std::error::Error;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// An operation wrapped with a retry policy.
pub struct Retryable<F, E> {
    policy: RetryPolicy<E>,
    op: F,
}

impl<F, E> Retryable<F, E> {
    pub fn new(policy: RetryPolicy<E>, op: F) -> Self {
        Self { policy, op }
    }

    pub fn policy(&self) -> &RetryPolicy<E> {
        &self.policy
    }

    /// Invoke the wrapped operation with the bound policy's retry loop.
    pub async fn call<Fut, T>(&mut self) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Error + 'static,
    {
        run_with_retry(&self.policy, &mut self.op).await
    }

    /// Invoke with a cancellation token governing the backoff waits.
    pub async fn call_cancellable<Fut, T>(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Error + 'static,
    {
        run_with_retry_cancellable(&self.policy, &mut self.op, cancel).await
    }
}
