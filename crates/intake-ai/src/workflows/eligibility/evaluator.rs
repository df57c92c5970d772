use chrono::{Duration, NaiveDate};

use super::domain::{reason, EligibilityStatus, EvaluationResult, IntakeRecord};
use super::normalize::{normalize_phone, parse_us_date};
use super::rules::{PayerRuleSet, SELF_PAY};

/// Fields that must be present before a record can be matched to a payer.
/// Checked in this order so reason codes come out deterministically.
const IDENTITY_FIELDS: [(&str, fn(&IntakeRecord) -> &str); 5] = [
    ("patient_id", |r| r.patient_id.as_str()),
    ("first_name", |r| r.first_name.as_str()),
    ("last_name", |r| r.last_name.as_str()),
    ("insurance_provider", |r| r.insurance_provider.as_str()),
    ("state", |r| r.state.as_str()),
];

/// Runs every local eligibility check against one record and derives the
/// final status from the accumulated reason codes.
pub fn evaluate(record: &IntakeRecord, rules: &PayerRuleSet, today: NaiveDate) -> EvaluationResult {
    let mut reasons = Vec::new();

    for (name, value) in IDENTITY_FIELDS {
        if value(record).trim().is_empty() {
            reasons.push(format!("MISSING_{}", name.to_uppercase()));
        }
    }

    let dob = parse_us_date(&record.dob);
    if let Err(fault) = dob {
        reasons.push(format!("DOB_{}", fault.code()));
    }

    let service_date = parse_us_date(&record.service_date);
    if let Err(fault) = service_date {
        reasons.push(format!("SERVICE_DATE_{}", fault.code()));
    }

    let phone = normalize_phone(&record.phone);
    if !record.phone.trim().is_empty() && phone.len() != 10 {
        reasons.push(reason::PHONE_INVALID_LENGTH.to_string());
    }

    let provider = record.insurance_provider.trim();
    if !provider.is_empty() && !rules.contains(provider) {
        reasons.push(reason::PAYER_NOT_SUPPORTED.to_string());
    }

    if let Some(rule) = rules.get(provider) {
        if provider != SELF_PAY {
            let member_id = record.member_id.trim();
            if member_id.is_empty() {
                reasons.push(reason::MISSING_MEMBER_ID.to_string());
            } else if !rule.member_id_regex.is_match(member_id) {
                reasons.push(reason::MEMBER_ID_INVALID_FORMAT.to_string());
            }

            let member_group = record.member_group.trim();
            if rule.requires_group_number && member_group.is_empty() {
                reasons.push(reason::MISSING_MEMBER_GROUP.to_string());
            } else if !member_group.is_empty() && !rule.group_regex.is_match(member_group) {
                reasons.push(reason::MEMBER_GROUP_INVALID_FORMAT.to_string());
            }

            if let Ok(service_date) = service_date {
                let cutoff = today - Duration::days(rule.active_coverage_days);
                if service_date < cutoff {
                    reasons.push(reason::COVERAGE_POSSIBLY_INACTIVE.to_string());
                }
            }
        }
    }

    let status = decide_status(&reasons);
    EvaluationResult {
        status,
        reasons,
        used_remote: false,
        adapter_error: None,
    }
}

fn decide_status(reasons: &[String]) -> EligibilityStatus {
    let hard_reject = reasons.iter().any(|code| {
        reason::HARD_REJECT_PREFIXES
            .iter()
            .any(|prefix| code.starts_with(prefix))
    });

    if hard_reject {
        EligibilityStatus::Rejected
    } else if reasons.is_empty() {
        EligibilityStatus::Approved
    } else {
        EligibilityStatus::Review
    }
}
