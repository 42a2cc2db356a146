//! Mutex-wrapped queue for shared callers.
//!
//! The inner [`AdmissionQueue`] is single-writer by design: none of its
//! structures tolerate concurrent mutation, and its contract assumes at
//! most one of `admit`/`dequeue` runs at a time against an instance. When
//! several producers or consumers share one queue, this wrapper supplies
//! that exclusion with a `parking_lot::Mutex`.

use parking_lot::Mutex;

use crate::config::QueueConfig;
use crate::engine::queue::{Admission, AdmissionQueue, QueueStats};
use crate::error::{ConfigError, InvariantError};
use crate::policy::registry::PolicyRegistry;
use crate::traits::Keyed;

/// Thread-safe wrapper around [`AdmissionQueue`].
#[derive(Debug)]
pub struct ConcurrentAdmissionQueue<P> {
    inner: Mutex<AdmissionQueue<P>>,
}

impl<P: Keyed> ConcurrentAdmissionQueue<P> {
    /// Builds a shared queue bound to the policy named in `config`.
    pub fn bind(registry: &PolicyRegistry, config: QueueConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(AdmissionQueue::bind(registry, config)?),
        })
    }

    /// Admits a packet under the bound policy.
    pub fn admit(&self, packet: P) -> Result<Admission, InvariantError> {
        let mut queue = self.inner.lock();
        queue.admit(packet)
    }

    /// Serves the next packet by processing order.
    pub fn dequeue(&self) -> Result<Option<P>, InvariantError> {
        let mut queue = self.inner.lock();
        queue.dequeue()
    }

    /// Returns the number of resident packets.
    pub fn len(&self) -> usize {
        let queue = self.inner.lock();
        queue.len()
    }

    /// Returns `true` if no packets are resident.
    pub fn is_empty(&self) -> bool {
        let queue = self.inner.lock();
        queue.is_empty()
    }

    /// Returns the name of the bound admission policy.
    pub fn policy_name(&self) -> String {
        let queue = self.inner.lock();
        queue.policy_name().to_string()
    }

    /// Echoes the queue's configuration.
    pub fn config(&self) -> QueueConfig {
        let queue = self.inner.lock();
        queue.config()
    }

    /// Returns the lifetime counters.
    pub fn stats(&self) -> QueueStats {
        let queue = self.inner.lock();
        queue.stats()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::policy::threshold::ThresholdPolicy;

    fn shared_queue(max_backlog: usize) -> ConcurrentAdmissionQueue<(u64, u64)> {
        let registry = PolicyRegistry::new();
        registry.register("bounded", Arc::new(ThresholdPolicy::new(max_backlog)));
        let config = QueueConfig::try_new("bounded").unwrap();
        ConcurrentAdmissionQueue::bind(&registry, config).unwrap()
    }

    #[test]
    fn basic_ops_through_the_lock() {
        let queue = shared_queue(16);
        queue.admit((1, 10)).unwrap();
        queue.admit((2, 20)).unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue().unwrap(), Some((2, 20)));
        assert_eq!(queue.policy_name(), "bounded");
        assert!(!queue.is_empty());
    }

    #[test]
    fn producers_and_consumer_share_one_queue() {
        let queue = Arc::new(shared_queue(1_000));
        let producers = 4;
        let per_producer = 100u64;

        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..per_producer {
                        queue.admit((p, i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut served = 0u64;
        while queue.dequeue().unwrap().is_some() {
            served += 1;
        }
        assert_eq!(served, producers * per_producer);
        assert!(queue.is_empty());
    }
}
