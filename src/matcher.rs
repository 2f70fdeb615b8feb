//! Failure-kind matching: decide whether a failure belongs to the inclusion set.
//!
//! Matching is structural, never based on message strings. A matcher is a
//! predicate over the caller's error type; [`failure_kind`] builds the common
//! case of matching a concrete error type anywhere in the `source()` chain,
//! which stands in for the type/supertype relationship of exception systems.

use std::error::Error;
use std::sync::Arc;

/// Predicate over a failure; an entry in a policy's inclusion set.
pub type FailureMatcher<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Matcher accepting any failure whose `source()` chain contains a `K`.
pub fn failure_kind<K, E>() -> FailureMatcher<E>
where
    K: Error + 'static,
    E: Error + 'static,
{
    Arc::new(|failure: &E| chain_contains::<K>(failure))
}

/// Walk a failure and its `source()` chain looking for a concrete `K`.
pub fn chain_contains<K: Error + 'static>(failure: &(dyn Error + 'static)) -> bool {
    let mut current: Option<&(dyn Error + 'static)> = Some(failure);
    while let Some(err) = current {
        if err.is::<K>() {
            return true;
        }
        current = err.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Timeout;

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "timed out")
        }
    }

    impl Error for Timeout {}

    #[derive(Debug)]
    struct RequestFailed {
        source: Timeout,
    }

    impl fmt::Display for RequestFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "request failed: {}", self.source)
        }
    }

    impl Error for RequestFailed {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.source)
        }
    }

    #[test]
    fn matches_exact_type() {
        assert!(chain_contains::<Timeout>(&Timeout));
    }

    #[test]
    fn matches_through_source_chain() {
        let err = RequestFailed { source: Timeout };
        assert!(chain_contains::<Timeout>(&err));
    }

    #[test]
    fn rejects_unrelated_type() {
        assert!(!chain_contains::<RequestFailed>(&Timeout));
    }

    #[test]
    fn failure_kind_matcher_wraps_chain_walk() {
        let m = failure_kind::<Timeout, RequestFailed>();
        assert!(m(&RequestFailed { source: Timeout }));
    }
}
