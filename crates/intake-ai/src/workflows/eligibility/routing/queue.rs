use super::super::domain::{EligibilityStatus, EvaluatedIntake, QueueDomain, WorkQueueEntry};
use super::actions::derive_actions;
use super::classifier::ReasonClassifier;

/// Builds one desk's work queue from a batch of evaluated records.
///
/// Only REVIEW and REJECTED records are candidates, and a record joins the
/// queue only when at least one of its reason codes belongs to this desk.
/// Entries come out HIGH before MEDIUM, then by last name and first name;
/// ties keep their input order.
pub fn build_queue(
    evaluated: &[EvaluatedIntake],
    classifier: &ReasonClassifier,
    domain: QueueDomain,
) -> Vec<WorkQueueEntry> {
    let mut entries: Vec<WorkQueueEntry> = evaluated
        .iter()
        .filter(|entry| {
            matches!(
                entry.result.status,
                EligibilityStatus::Review | EligibilityStatus::Rejected
            )
        })
        .filter_map(|entry| {
            let split = classifier.classify(&entry.result.reasons);
            let domain_reasons = split.for_domain(domain);
            if domain_reasons.is_empty() {
                return None;
            }

            let domain_reasons = domain_reasons.to_vec();
            let (next_action, priority) = derive_actions(&domain_reasons, domain);
            Some(WorkQueueEntry {
                record: entry.record.clone(),
                status: entry.result.status,
                domain,
                priority,
                next_action,
                domain_reasons,
                reasons: entry.result.reasons.clone(),
                used_remote: entry.result.used_remote,
                adapter_error: entry.result.adapter_error.clone(),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        (a.priority.rank(), &a.record.last_name, &a.record.first_name).cmp(&(
            b.priority.rank(),
            &b.record.last_name,
            &b.record.first_name,
        ))
    });

    entries
}
