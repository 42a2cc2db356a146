pub mod registry;
pub mod threshold;

pub use registry::{PolicyBinding, PolicyRegistry};
pub use threshold::{policy_fn, ThresholdPolicy};
