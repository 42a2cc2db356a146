//! Error types for the queuekit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when the paired-entry bookkeeping between
//!   the admission and processing orderings is found to be broken (a
//!   cross-reference that cannot be resolved). This must never occur under
//!   correct operation; callers should treat it as fatal.
//! - [`ConfigError`]: Returned when queue configuration is invalid (an
//!   admission policy name that is empty, oversized, or not registered).
//!
//! An empty queue is *not* an error: `dequeue` reports it as `Ok(None)`,
//! keeping "nothing to dispatch" distinguishable from corruption.

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal queue invariants are violated.
///
/// Produced when an operation that removes a packet from one ordering cannot
/// locate the packet's sibling entry in the other ordering. Carries a
/// human-readable description of which resolution failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when queue configuration is invalid.
///
/// Produced by [`QueueConfig::try_new`](crate::config::QueueConfig::try_new)
/// when the policy name fails validation, and by
/// [`AdmissionQueue::bind`](crate::engine::queue::AdmissionQueue::bind) when
/// the named policy is not present in the registry. A queue is never
/// constructed from an invalid configuration.
///
/// # Example
///
/// ```
/// use queuekit::config::QueueConfig;
///
/// let err = QueueConfig::try_new("").unwrap_err();
/// assert!(err.to_string().contains("policy name"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("sibling entry missing");
        assert_eq!(err.to_string(), "sibling entry missing");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("bucket count mismatch");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bucket count mismatch"));
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("policy name must not be empty");
        assert_eq!(err.to_string(), "policy name must not be empty");
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
