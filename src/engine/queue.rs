//! Dual-ordering admission queue.
//!
//! Every resident packet is filed in two sorted orderings at once: the
//! *admission* ordering (eviction eligibility) and the *processing*
//! ordering (dispatch priority). Each ordering is a [`KeyedFifo`]; the two
//! sides are tied together by cross-reference keys, never by pointers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AdmissionQueue<P>                               │
//! │                                                                         │
//! │   packets: SlotArena<P>        ← single owner of every resident packet  │
//! │                                                                         │
//! │   admission: KeyedFifo<Entry>            processing: KeyedFifo<Entry>   │
//! │   ┌──────┬──────────────────────┐        ┌──────┬──────────────────────┐│
//! │   │ key  │ FIFO of entries      │        │ key  │ FIFO of entries      ││
//! │   ├──────┼──────────────────────┤        ├──────┼──────────────────────┤│
//! │   │  3   │ {pkt: x, other: 40}  │        │ 40   │ {pkt: x, other: 3}   ││
//! │   │  5   │ {pkt: y, other: 90}  │        │ 90   │ {pkt: y, other: 5}   ││
//! │   │      │ {pkt: z, other: 90}  │        │      │ {pkt: z, other: 5}   ││
//! │   └──────┴──────────────────────┘        └──────┴──────────────────────┘│
//! │        ▲ reshape evicts here                  ▲ dequeue serves here     │
//! │        │ (max key, oldest first)              │ (max key, oldest first) │
//! │                                                                         │
//! │   policy: Arc<dyn AdmissionPolicy>  ← bound once, by name, at build     │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! admit(p):
//!   policy.evaluate(len) ──► WithinBounds ──► enqueue(p)
//!                        └─► OverBounds  ──► reshape(p):
//!                              evict head of max admission bucket,
//!                              drop it, then enqueue(p)  (len unchanged)
//! ```
//!
//! ## Operations
//!
//! | Method      | Complexity        | Notes                                |
//! |-------------|-------------------|--------------------------------------|
//! | `bind`      | O(registry)       | Fails on unknown policy name         |
//! | `enqueue`   | O(log n)          | Both orderings, count +1             |
//! | `admit`     | O(log n + bucket) | One policy call, at most one evict   |
//! | `dequeue`   | O(log n + bucket) | Max processing key, FIFO within key  |
//! | `len`       | O(1)              | Resident packet count                |
//!
//! The bucket term is the linear scan that resolves a cross-reference to
//! the sibling entry; it is bounded by the number of packets sharing one
//! key.
//!
//! ## Invariant
//!
//! For every resident packet there is exactly one admission entry and one
//! processing entry, each holding the other ordering's key for the packet.
//! Removal always takes out both. A cross-reference that fails to resolve
//! surfaces as [`InvariantError`] — it is never conflated with an empty
//! queue.
//!
//! ## Thread Safety
//!
//! `AdmissionQueue` is single-writer by design; callers serialize access
//! per instance. [`ConcurrentAdmissionQueue`] adds that exclusion when
//! multiple callers are possible.
//!
//! [`ConcurrentAdmissionQueue`]: crate::engine::concurrent::ConcurrentAdmissionQueue

use std::fmt;
use std::sync::Arc;

use crate::config::QueueConfig;
use crate::ds::keyed_fifo::KeyedFifo;
use crate::ds::slot_arena::SlotArena;
use crate::error::{ConfigError, InvariantError};
use crate::policy::registry::PolicyRegistry;
use crate::traits::{AdmissionPolicy, Keyed, PacketId, Verdict};

/// How an [`admit`](AdmissionQueue::admit) call was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The policy was within bounds; the packet was enqueued directly.
    Enqueued,
    /// The policy was over bounds; one resident was evicted first.
    Reshaped,
}

/// Lifetime counters for one queue instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Packets accepted into the queue (including reshape re-admissions).
    pub enqueued: u64,
    /// Packets served to a consumer.
    pub dequeued: u64,
    /// Packets destroyed by reshape evictions.
    pub dropped: u64,
}

/// One side's record of a resident packet: its identity plus the key it is
/// filed under on the *other* side.
#[derive(Debug, Clone, Copy)]
struct Entry {
    packet: PacketId,
    other_key: u64,
}

/// Packet queue ordered twice: by admission key and by processing key.
pub struct AdmissionQueue<P> {
    packets: SlotArena<P>,
    admission: KeyedFifo<Entry>,
    processing: KeyedFifo<Entry>,
    len: usize,
    policy: Arc<dyn AdmissionPolicy>,
    config: QueueConfig,
    stats: QueueStats,
}

impl<P: Keyed> AdmissionQueue<P> {
    /// Builds a queue bound to the policy named in `config`.
    ///
    /// The name is resolved against `registry` exactly once, here; the
    /// queue keeps its own clone of the policy and never rebinds. An
    /// unresolved name is a fatal configuration error and no queue is
    /// produced.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use queuekit::config::QueueConfig;
    /// use queuekit::engine::queue::AdmissionQueue;
    /// use queuekit::policy::registry::PolicyRegistry;
    /// use queuekit::policy::threshold::ThresholdPolicy;
    ///
    /// let registry = PolicyRegistry::new();
    /// registry.register("bounded", Arc::new(ThresholdPolicy::new(128)));
    ///
    /// let config = QueueConfig::try_new("bounded")?;
    /// let queue: AdmissionQueue<(u64, u64)> = AdmissionQueue::bind(&registry, config)?;
    /// assert_eq!(queue.policy_name(), "bounded");
    /// # Ok::<(), queuekit::error::ConfigError>(())
    /// ```
    pub fn bind(registry: &PolicyRegistry, config: QueueConfig) -> Result<Self, ConfigError> {
        let binding = registry.lookup(config.policy()).ok_or_else(|| {
            ConfigError::new(format!(
                "unknown admission policy \"{}\"",
                config.policy()
            ))
        })?;
        Ok(Self {
            packets: SlotArena::new(),
            admission: KeyedFifo::new(),
            processing: KeyedFifo::new(),
            len: 0,
            policy: binding.policy().clone(),
            config,
            stats: QueueStats::default(),
        })
    }

    /// Returns the number of resident packets.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no packets are resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the name of the bound admission policy.
    #[inline]
    pub fn policy_name(&self) -> &str {
        self.config.policy()
    }

    /// Echoes the queue's configuration, unchanged (the dump query).
    pub fn config(&self) -> QueueConfig {
        self.config.clone()
    }

    /// Returns the lifetime counters.
    #[inline]
    pub fn stats(&self) -> QueueStats {
        self.stats
    }

    /// Files `packet` into both orderings unconditionally.
    ///
    /// Keys are sampled here, once; the packet is never re-queried. This is
    /// the only operation that grows the queue. Ownership of the packet
    /// transfers to the queue until `dequeue` hands it back or a reshape
    /// destroys it.
    pub fn enqueue(&mut self, packet: P) {
        let admission_key = packet.admission_key();
        let processing_key = packet.processing_key();
        let id = self.packets.insert(packet);

        self.admission.push_back(
            admission_key,
            Entry {
                packet: id,
                other_key: processing_key,
            },
        );
        self.processing.push_back(
            processing_key,
            Entry {
                packet: id,
                other_key: admission_key,
            },
        );
        self.len += 1;
        self.stats.enqueued += 1;
    }

    /// Admits `packet` under the bound policy.
    ///
    /// Within bounds, this is a plain [`enqueue`](Self::enqueue). Over
    /// bounds, exactly one resident is evicted first — the policy is *not*
    /// re-consulted afterwards, so a single admission does a bounded amount
    /// of work even when the queue is far over its nominal bound.
    pub fn admit(&mut self, packet: P) -> Result<Admission, InvariantError> {
        match self.policy.evaluate(self.len) {
            Verdict::WithinBounds => {
                self.enqueue(packet);
                Ok(Admission::Enqueued)
            },
            Verdict::OverBounds => {
                self.reshape(packet)?;
                Ok(Admission::Reshaped)
            },
        }
    }

    /// Serves the next packet by processing order: the greatest processing
    /// key, oldest arrival first within that key.
    ///
    /// `Ok(None)` means the queue is empty — a normal condition. An
    /// admission-side sibling that cannot be resolved means the paired
    /// bookkeeping is broken and surfaces as `Err`.
    pub fn dequeue(&mut self) -> Result<Option<P>, InvariantError> {
        let Some(processing_key) = self.processing.max_key() else {
            return Ok(None);
        };
        let target = self
            .processing
            .pop_front(processing_key)
            .ok_or_else(|| InvariantError::new("processing bucket vanished under its key"))?;

        let sibling = self
            .admission
            .scan_bucket(target.other_key, |entry| entry.packet == target.packet)
            .ok_or_else(|| {
                InvariantError::new("admission-side entry missing for dispatched packet")
            })?;
        self.admission.remove(sibling);

        let packet = self
            .packets
            .remove(target.packet)
            .ok_or_else(|| InvariantError::new("packet storage missing for dispatched packet"))?;

        self.len -= 1;
        self.stats.dequeued += 1;
        Ok(Some(packet))
    }

    /// Evicts one resident to make room, then enqueues `packet`.
    ///
    /// The victim is the oldest packet in the bucket with the greatest
    /// admission key — worst eligibility, first arrived. Its processing
    /// entry is resolved through the stored cross-reference and an identity
    /// scan of that one bucket. Net occupancy is unchanged: one destroyed,
    /// one admitted.
    fn reshape(&mut self, packet: P) -> Result<(), InvariantError> {
        let Some(admission_key) = self.admission.max_key() else {
            // The policy reported over-bounds for an empty queue; there is
            // nothing to trade away.
            return Err(InvariantError::new(
                "reshape requested but no packets are resident",
            ));
        };
        let victim = self
            .admission
            .pop_front(admission_key)
            .ok_or_else(|| InvariantError::new("admission bucket vanished under its key"))?;

        let sibling = self
            .processing
            .scan_bucket(victim.other_key, |entry| entry.packet == victim.packet)
            .ok_or_else(|| {
                InvariantError::new("processing-side entry missing for evicted packet")
            })?;
        self.processing.remove(sibling);

        // Destroy the victim; ownership ends here.
        self.packets.remove(victim.packet);
        self.len -= 1;
        self.stats.dropped += 1;

        self.enqueue(packet);
        Ok(())
    }

    /// Validates the paired-entry bookkeeping end to end.
    ///
    /// Available in debug/test builds. Checks that both orderings and the
    /// packet store agree on the resident count and that every packet has
    /// exactly one entry per ordering, each cross-referencing the other's
    /// key.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        use rustc_hash::FxHashMap;

        self.admission.debug_validate_invariants();
        self.processing.debug_validate_invariants();

        if self.admission.len() != self.len
            || self.processing.len() != self.len
            || self.packets.len() != self.len
        {
            return Err(InvariantError::new(format!(
                "resident counts disagree: len={} admission={} processing={} packets={}",
                self.len,
                self.admission.len(),
                self.processing.len(),
                self.packets.len()
            )));
        }

        // packet -> (admission key, cross-referenced processing key)
        let mut filed: FxHashMap<PacketId, (u64, u64)> = FxHashMap::default();
        for (key, entry) in self.admission.iter() {
            if filed.insert(entry.packet, (key, entry.other_key)).is_some() {
                return Err(InvariantError::new(
                    "packet filed twice in the admission ordering",
                ));
            }
        }

        for (key, entry) in self.processing.iter() {
            let Some((admission_key, processing_key)) = filed.remove(&entry.packet) else {
                return Err(InvariantError::new(
                    "processing entry without an admission sibling",
                ));
            };
            if processing_key != key {
                return Err(InvariantError::new(format!(
                    "admission cross-reference {processing_key} does not match processing key {key}"
                )));
            }
            if entry.other_key != admission_key {
                return Err(InvariantError::new(format!(
                    "processing cross-reference {} does not match admission key {admission_key}",
                    entry.other_key
                )));
            }
            if !self.packets.contains(entry.packet) {
                return Err(InvariantError::new("entry refers to a released packet"));
            }
        }

        if !filed.is_empty() {
            return Err(InvariantError::new(
                "admission entry without a processing sibling",
            ));
        }
        Ok(())
    }
}

impl<P> fmt::Debug for AdmissionQueue<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionQueue")
            .field("len", &self.len)
            .field("policy", &self.config.policy())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
