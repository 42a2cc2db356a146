//! # Queue Trait Seams
//!
//! This module defines the two seams the queue engine is generic over: how
//! a packet yields its ordering keys ([`Keyed`]), and how an admission
//! policy judges occupancy ([`AdmissionPolicy`]).
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────────────────────┐
//!                    │            Keyed (packet)            │
//!                    │                                      │
//!                    │  admission_key(&self)  → u64         │
//!                    │  processing_key(&self) → u64         │
//!                    └──────────────────┬───────────────────┘
//!                                       │ sampled once, at admission
//!                                       ▼
//!    ┌───────────────────┐      ┌──────────────────┐
//!    │ AdmissionPolicy   │      │ AdmissionQueue   │
//!    │                   │◄─────┤                  │
//!    │ evaluate(usize)   │      │ admit / dequeue  │
//!    │   → Verdict       │─────►│                  │
//!    └───────────────────┘      └──────────────────┘
//!        WithinBounds → enqueue as-is
//!        OverBounds   → evict one resident first ("reshape")
//! ```
//!
//! ## Design Notes
//!
//! A policy sees only the occupancy count, never the queue internals, and
//! may not mutate them; any extra state it consults is its own (captured in
//! the implementing type). Policies are shared between a registry and every
//! queue bound to them, hence the `Send + Sync` bound.

use crate::ds::slot_arena::SlotId;

/// A packet that can be filed into both queue orderings.
///
/// Both keys are sampled exactly once, when the packet is admitted, and
/// cached by the queue; they must not change while the packet is resident.
/// The original transport derivation (a classification field for admission,
/// the payload length for processing) is one choice among many — any `u64`
/// pair works.
///
/// # Example
///
/// ```
/// use queuekit::traits::Keyed;
///
/// struct Frame {
///     tos: u8,
///     payload: Vec<u8>,
/// }
///
/// impl Keyed for Frame {
///     fn admission_key(&self) -> u64 {
///         u64::from(self.tos)
///     }
///
///     fn processing_key(&self) -> u64 {
///         self.payload.len() as u64
///     }
/// }
/// ```
pub trait Keyed {
    /// Key ordering packets for eviction selection (greatest evicts first).
    fn admission_key(&self) -> u64;

    /// Key ordering packets for dispatch selection (greatest serves first).
    fn processing_key(&self) -> u64;
}

/// `(admission_key, processing_key)` pairs are packets; handy in tests and
/// benches.
impl Keyed for (u64, u64) {
    fn admission_key(&self) -> u64 {
        self.0
    }

    fn processing_key(&self) -> u64 {
        self.1
    }
}

/// Outcome of an admission-policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Occupancy is acceptable; the packet is enqueued as-is.
    WithinBounds,
    /// Occupancy is over bound; one resident is evicted before the packet
    /// is enqueued.
    OverBounds,
}

/// An admission policy: a pure judgment over the current occupancy.
///
/// Implementations must not block and must not touch queue internals. One
/// policy object may be bound by many queues concurrently.
///
/// # Example
///
/// ```
/// use queuekit::traits::{AdmissionPolicy, Verdict};
///
/// struct Always;
///
/// impl AdmissionPolicy for Always {
///     fn evaluate(&self, _occupancy: usize) -> Verdict {
///         Verdict::WithinBounds
///     }
/// }
/// ```
pub trait AdmissionPolicy: Send + Sync {
    /// Judges the given occupancy (number of resident packets).
    fn evaluate(&self, occupancy: usize) -> Verdict;
}

/// Marker alias kept for readability in engine internals: the handle of a
/// packet in the engine's arena doubles as the packet's identity.
pub(crate) type PacketId = SlotId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_packets_expose_their_keys() {
        let packet = (9u64, 1500u64);
        assert_eq!(packet.admission_key(), 9);
        assert_eq!(packet.processing_key(), 1500);
    }

    #[test]
    fn verdict_is_comparable() {
        assert_eq!(Verdict::WithinBounds, Verdict::WithinBounds);
        assert_ne!(Verdict::WithinBounds, Verdict::OverBounds);
    }

    #[test]
    fn policies_are_object_safe() {
        struct Never;
        impl AdmissionPolicy for Never {
            fn evaluate(&self, _occupancy: usize) -> Verdict {
                Verdict::OverBounds
            }
        }

        let policy: Box<dyn AdmissionPolicy> = Box::new(Never);
        assert_eq!(policy.evaluate(0), Verdict::OverBounds);
    }
}
