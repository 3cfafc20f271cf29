//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions over the caller's context that decide whether
//! a transition may be selected. They are expected to be side-effect free.

use std::fmt;

/// Predicate over a context that gates a transition.
///
/// # Example
///
/// ```rust
/// use hsm::core::Guard;
///
/// struct Quota {
///     remaining: u32,
/// }
///
/// let has_quota = Guard::new(|q: &Quota| q.remaining > 0);
///
/// assert!(has_quota.check(&Quota { remaining: 1 }));
/// assert!(!has_quota.check(&Quota { remaining: 0 }));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate.
    ///
    /// The predicate should be deterministic for a given context and must be
    /// thread-safe, since one definition is shared by many drivers.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against a context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// Evaluate an ordered guard list with AND semantics.
///
/// An empty list passes. Evaluation stops at the first failing guard, so
/// later guards never observe a context an earlier guard rejected.
pub fn all_pass<C>(guards: &[Guard<C>], context: &C) -> bool {
    guards.iter().all(|guard| guard.check(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Replica {
        healthy: bool,
        lag: u64,
    }

    #[test]
    fn guard_checks_context() {
        let guard = Guard::new(|r: &Replica| r.healthy);

        assert!(guard.check(&Replica {
            healthy: true,
            lag: 0
        }));
        assert!(!guard.check(&Replica {
            healthy: false,
            lag: 0
        }));
    }

    #[test]
    fn guard_is_deterministic() {
        let replica = Replica {
            healthy: true,
            lag: 10,
        };
        let guard = Guard::new(|r: &Replica| r.lag < 100);

        assert_eq!(guard.check(&replica), guard.check(&replica));
    }

    #[test]
    fn empty_guard_list_passes() {
        let guards: Vec<Guard<Replica>> = Vec::new();
        assert!(all_pass(
            &guards,
            &Replica {
                healthy: false,
                lag: 0
            }
        ));
    }

    #[test]
    fn all_pass_requires_every_guard() {
        let guards = vec![
            Guard::new(|r: &Replica| r.healthy),
            Guard::new(|r: &Replica| r.lag < 100),
        ];

        assert!(all_pass(
            &guards,
            &Replica {
                healthy: true,
                lag: 5
            }
        ));
        assert!(!all_pass(
            &guards,
            &Replica {
                healthy: true,
                lag: 500
            }
        ));
    }

    #[test]
    fn all_pass_short_circuits_on_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let guards = vec![
            Guard::new(|r: &Replica| r.healthy),
            Guard::new(move |_: &Replica| {
                counted.fetch_add(1, Ordering::SeqCst);
                true
            }),
        ];

        assert!(!all_pass(
            &guards,
            &Replica {
                healthy: false,
                lag: 0
            }
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
