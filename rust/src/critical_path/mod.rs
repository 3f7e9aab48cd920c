//! Critical path calculation.
//!
//! Runs the forward pass (early start/finish), the backward pass (late
//! start/finish), derives slack, and collects the zero-slack task set.

mod calculation;
mod types;

pub use calculation::{
    apply_timings, build_dependents_map, calculate_network, DependentsMap, NetworkError,
};
pub use types::{NetworkResult, TaskTiming, DEFAULT_CRITICAL_TOLERANCE};
