//! Remote eligibility adapter and the stand-in payer service behind it.

mod client;
mod stub;

pub use client::{EligibilityRequest, RemoteCallError, RemoteDecision, RemoteEligibilityClient};
pub use stub::{payer_stub_router, stub_decision, EligibilityResponse, STUB_SUPPORTED_PAYERS};

use chrono::NaiveDate;
use tracing::warn;

use super::domain::{reason, EvaluationResult, IntakeRecord};
use super::evaluator;
use super::rules::PayerRuleSet;

/// Evaluation strategy for a run. Remote mode adopts the payer's decision
/// verbatim when the call succeeds; when it fails the record is decided by
/// the local rules instead, flagged with API_FALLBACK_USED. A batch never
/// aborts because the payer endpoint is down.
#[derive(Debug)]
pub enum EligibilityEvaluator {
    Local,
    RemoteWithFallback(RemoteEligibilityClient),
}

impl EligibilityEvaluator {
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteWithFallback(_))
    }

    pub async fn evaluate(
        &self,
        record: &IntakeRecord,
        rules: &PayerRuleSet,
        today: NaiveDate,
    ) -> EvaluationResult {
        match self {
            Self::Local => evaluator::evaluate(record, rules, today),
            Self::RemoteWithFallback(client) => match client.check(record).await {
                Ok(decision) => EvaluationResult {
                    status: decision.status,
                    reasons: decision.reasons,
                    used_remote: true,
                    adapter_error: None,
                },
                Err(error) => {
                    warn!(
                        patient_id = %record.patient_id,
                        %error,
                        "eligibility api failed, falling back to local rules"
                    );
                    let mut result = evaluator::evaluate(record, rules, today);
                    result.reasons.push(reason::API_FALLBACK_USED.to_string());
                    result.adapter_error = Some(error.to_string());
                    result
                }
            },
        }
    }
}
