pub use crate::config::{QueueConfig, POLICY_NAME_MAX};
pub use crate::ds::{KeyedFifo, SlotArena, SlotId};
pub use crate::engine::{Admission, AdmissionQueue, QueueStats};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::{policy_fn, PolicyBinding, PolicyRegistry, ThresholdPolicy};
pub use crate::traits::{AdmissionPolicy, Keyed, Verdict};

#[cfg(feature = "concurrency")]
pub use crate::engine::ConcurrentAdmissionQueue;
