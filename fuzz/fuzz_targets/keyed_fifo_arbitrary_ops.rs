#![no_main]

use libfuzzer_sys::fuzz_target;
use queuekit::ds::{KeyedFifo, SlotId};

// Fuzz arbitrary push/pop/remove sequences against KeyedFifo.
//
// Tests specific invariants:
// - no empty bucket survives the call that empties it
// - FIFO order within a key
// - handles go stale on removal
// - max_key tracks live buckets
fuzz_target!(|data: &[u8]| {
    let mut fifo: KeyedFifo<u16> = KeyedFifo::new();
    let mut live: Vec<(SlotId, u64, u16)> = Vec::new();
    let mut stamp: u16 = 0;

    for chunk in data.chunks(2) {
        let op = chunk[0] % 4;
        let key = u64::from(*chunk.get(1).unwrap_or(&0) % 8);

        match op {
            0 | 1 => {
                let id = fifo.push_back(key, stamp);
                live.push((id, key, stamp));
                stamp = stamp.wrapping_add(1);
            },
            2 => {
                if let Some(value) = fifo.pop_front(key) {
                    // The popped value must be the oldest recorded for the key.
                    let position = live
                        .iter()
                        .position(|(_, k, v)| *k == key && *v == value)
                        .expect("popped a value that was never pushed");
                    let oldest = live
                        .iter()
                        .position(|(_, k, _)| *k == key)
                        .expect("bucket existed without recorded values");
                    assert_eq!(position, oldest, "pop_front skipped an older value");
                    live.remove(position);
                } else {
                    assert!(
                        live.iter().all(|(_, k, _)| *k != key),
                        "pop_front missed a non-empty bucket"
                    );
                }
            },
            3 => {
                if !live.is_empty() {
                    let pick = usize::from(chunk[0]) % live.len();
                    let (id, _, value) = live.remove(pick);
                    assert_eq!(fifo.remove(id), Some(value));
                    assert_eq!(fifo.remove(id), None, "handle stayed live after removal");
                }
            },
            _ => unreachable!(),
        }

        fifo.debug_validate_invariants();
        assert_eq!(fifo.len(), live.len());
        assert_eq!(
            fifo.max_key(),
            live.iter().map(|(_, k, _)| *k).max(),
            "max_key disagrees with the live set"
        );
        for (_, key, _) in &live {
            assert!(fifo.bucket_len(*key) > 0);
        }
    }
});
