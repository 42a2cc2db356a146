#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use queuekit::config::QueueConfig;
use queuekit::engine::queue::AdmissionQueue;
use queuekit::policy::registry::PolicyRegistry;
use queuekit::policy::threshold::ThresholdPolicy;

// Fuzz arbitrary admit/dequeue sequences against the paired-entry
// bookkeeping.
//
// Every operation is followed by a full invariant sweep:
// - one admission entry and one processing entry per resident packet
// - cross-references agree with the sibling's key
// - occupancy count matches both orderings and the packet store
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let bound = usize::from(data[0] % 32);
    let registry = PolicyRegistry::new();
    registry.register("fuzzed", Arc::new(ThresholdPolicy::new(bound)));
    let config = match QueueConfig::try_new("fuzzed") {
        Ok(config) => config,
        Err(_) => return,
    };
    let mut queue: AdmissionQueue<(u64, u64)> = match AdmissionQueue::bind(&registry, config) {
        Ok(queue) => queue,
        Err(_) => return,
    };

    for chunk in data[1..].chunks(3) {
        let op = chunk[0] % 4;
        let admission_key = u64::from(*chunk.get(1).unwrap_or(&0) % 16);
        let processing_key = u64::from(*chunk.get(2).unwrap_or(&0) % 16);

        match op {
            // Admissions outnumber dequeues so eviction pressure builds.
            0 | 1 => {
                queue
                    .admit((admission_key, processing_key))
                    .expect("admit broke the paired bookkeeping");
            },
            2 => {
                queue.enqueue((admission_key, processing_key));
            },
            3 => {
                queue
                    .dequeue()
                    .expect("dequeue broke the paired bookkeeping");
            },
            _ => unreachable!(),
        }

        queue
            .check_invariants()
            .expect("invariant sweep failed after an operation");
    }

    // Drain to empty; every dispatch must resolve its sibling.
    while queue
        .dequeue()
        .expect("drain broke the paired bookkeeping")
        .is_some()
    {}
    assert!(queue.is_empty());
});
