//! Splitting decided records into per-desk work queues.

mod actions;
mod classifier;
mod queue;

pub use actions::derive_actions;
pub use classifier::{DomainReasons, ReasonClassifier};
pub use queue::build_queue;
