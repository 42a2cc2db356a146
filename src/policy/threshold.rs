//! Backlog-threshold admission policies.
//!
//! The canonical policy shape: a single comparison of occupancy against a
//! fixed bound. Deployments historically shipped these as loadable modules
//! with bounds like 200 and 50; here they are one parameterized type.

use std::sync::Arc;

use crate::traits::{AdmissionPolicy, Verdict};

/// Admits while occupancy is at or below a fixed backlog bound.
///
/// # Example
///
/// ```
/// use queuekit::policy::threshold::ThresholdPolicy;
/// use queuekit::traits::{AdmissionPolicy, Verdict};
///
/// let policy = ThresholdPolicy::new(200);
/// assert_eq!(policy.evaluate(200), Verdict::WithinBounds);
/// assert_eq!(policy.evaluate(201), Verdict::OverBounds);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    max_backlog: usize,
}

impl ThresholdPolicy {
    /// Creates a policy bounding occupancy at `max_backlog` packets.
    pub fn new(max_backlog: usize) -> Self {
        Self { max_backlog }
    }

    /// Returns the configured bound.
    pub fn max_backlog(&self) -> usize {
        self.max_backlog
    }
}

impl AdmissionPolicy for ThresholdPolicy {
    fn evaluate(&self, occupancy: usize) -> Verdict {
        if occupancy <= self.max_backlog {
            Verdict::WithinBounds
        } else {
            Verdict::OverBounds
        }
    }
}

struct FnPolicy<F>(F);

impl<F> AdmissionPolicy for FnPolicy<F>
where
    F: Fn(usize) -> Verdict + Send + Sync,
{
    fn evaluate(&self, occupancy: usize) -> Verdict {
        (self.0)(occupancy)
    }
}

/// Wraps a closure as a registrable [`AdmissionPolicy`].
///
/// The closure may capture state of its own; the queue only ever feeds it
/// the occupancy count.
///
/// # Example
///
/// ```
/// use queuekit::policy::threshold::policy_fn;
/// use queuekit::traits::{AdmissionPolicy, Verdict};
///
/// let soft = policy_fn(|occupancy| {
///     if occupancy < 64 {
///         Verdict::WithinBounds
///     } else {
///         Verdict::OverBounds
///     }
/// });
/// assert_eq!(soft.evaluate(0), Verdict::WithinBounds);
/// ```
pub fn policy_fn<F>(f: F) -> Arc<dyn AdmissionPolicy>
where
    F: Fn(usize) -> Verdict + Send + Sync + 'static,
{
    Arc::new(FnPolicy(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundary_is_inclusive() {
        let policy = ThresholdPolicy::new(50);
        assert_eq!(policy.evaluate(0), Verdict::WithinBounds);
        assert_eq!(policy.evaluate(50), Verdict::WithinBounds);
        assert_eq!(policy.evaluate(51), Verdict::OverBounds);
        assert_eq!(policy.max_backlog(), 50);
    }

    #[test]
    fn zero_bound_only_admits_into_empty_queue() {
        let policy = ThresholdPolicy::new(0);
        assert_eq!(policy.evaluate(0), Verdict::WithinBounds);
        assert_eq!(policy.evaluate(1), Verdict::OverBounds);
    }

    #[test]
    fn closure_policy_sees_occupancy() {
        let policy = policy_fn(|occupancy| {
            if occupancy % 2 == 0 {
                Verdict::WithinBounds
            } else {
                Verdict::OverBounds
            }
        });
        assert_eq!(policy.evaluate(2), Verdict::WithinBounds);
        assert_eq!(policy.evaluate(3), Verdict::OverBounds);
    }
}
