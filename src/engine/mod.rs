pub mod concurrent;
pub mod queue;

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentAdmissionQueue;
pub use queue::{Admission, AdmissionQueue, QueueStats};
