//! Queue configuration boundary.
//!
//! The externally persisted state of a queue is exactly one field: the name
//! of the admission policy it was bound to. [`QueueConfig`] validates that
//! name at the edge (the wire format caps it at [`POLICY_NAME_MAX`] bytes)
//! and is echoed back unchanged by a configuration dump.

use crate::error::ConfigError;

/// Maximum length, in bytes, of a policy name in the wire format.
pub const POLICY_NAME_MAX: usize = 32;

/// Validated queue configuration: the name of the admission policy to bind.
///
/// # Example
///
/// ```
/// use queuekit::config::QueueConfig;
///
/// let config = QueueConfig::try_new("drop_worst_200")?;
/// assert_eq!(config.policy(), "drop_worst_200");
/// # Ok::<(), queuekit::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    policy: String,
}

impl QueueConfig {
    /// Validates a policy name and builds a configuration from it.
    ///
    /// Fails if the name is empty or longer than [`POLICY_NAME_MAX`] bytes.
    /// Whether the name resolves to a registered policy is checked later,
    /// at bind time.
    pub fn try_new(policy: impl Into<String>) -> Result<Self, ConfigError> {
        let policy = policy.into();
        if policy.is_empty() {
            return Err(ConfigError::new("policy name must not be empty"));
        }
        if policy.len() > POLICY_NAME_MAX {
            return Err(ConfigError::new(format!(
                "policy name exceeds {POLICY_NAME_MAX} bytes: \"{policy}\""
            )));
        }
        Ok(Self { policy })
    }

    /// Returns the configured policy name.
    #[inline]
    pub fn policy(&self) -> &str {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        let config = QueueConfig::try_new("drop_worst").unwrap();
        assert_eq!(config.policy(), "drop_worst");
    }

    #[test]
    fn rejects_empty_name() {
        let err = QueueConfig::try_new("").unwrap_err();
        assert!(err.message().contains("empty"));
    }

    #[test]
    fn boundary_length_is_accepted() {
        let name = "p".repeat(POLICY_NAME_MAX);
        let config = QueueConfig::try_new(name.clone()).unwrap();
        assert_eq!(config.policy(), name);
    }

    #[test]
    fn oversized_name_is_rejected() {
        let name = "p".repeat(POLICY_NAME_MAX + 1);
        let err = QueueConfig::try_new(name).unwrap_err();
        assert!(err.message().contains("exceeds"));
    }

    #[test]
    fn length_is_measured_in_bytes() {
        // 17 two-byte characters: 17 chars but 34 bytes.
        let name = "é".repeat(17);
        assert!(QueueConfig::try_new(name).is_err());
    }
}
