//! Patient intake eligibility: local rule evaluation, the remote payer
//! adapter with fallback, reason-code routing into desk work queues, and
//! batch summary statistics.
//!
//! Records are evaluated in isolation and never mutated; queues and the
//! summary are derived views over the completed result set.

pub mod domain;
pub mod remote;
pub mod routing;
pub mod rules;

mod evaluator;
mod normalize;
mod summary;

#[cfg(test)]
mod tests;

pub use domain::{
    EligibilityStatus, EvaluatedIntake, EvaluationResult, IntakeRecord, Priority, QueueDomain,
    WorkQueueEntry,
};
pub use evaluator::evaluate;
pub use normalize::{normalize_phone, parse_us_date, DateFault};
pub use remote::{
    payer_stub_router, EligibilityEvaluator, EligibilityRequest, RemoteCallError,
    RemoteEligibilityClient,
};
pub use routing::{build_queue, derive_actions, DomainReasons, ReasonClassifier};
pub use rules::{PayerRule, PayerRuleSet, RulesError, SELF_PAY};
pub use summary::{summarize, BatchSummary, ReasonCount, RemoteUsageCounts, StatusCounts};
