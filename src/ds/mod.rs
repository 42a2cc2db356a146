pub mod keyed_fifo;
pub mod slot_arena;

pub use keyed_fifo::{KeyedFifo, KeyedFifoIter};
pub use slot_arena::{SlotArena, SlotId};
