use chrono::NaiveDate;

use crate::workflows::eligibility::domain::{
    EligibilityStatus, EvaluatedIntake, EvaluationResult, IntakeRecord,
};
use crate::workflows::eligibility::rules::PayerRuleSet;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn rule_set() -> PayerRuleSet {
    PayerRuleSet::from_json(
        r#"{
            "Kaiser": { "requires_group_number": true },
            "Aetna": { "active_coverage_days": 180 },
            "BlueCross": {},
            "United": { "member_id_regex": "^U-\\d{8}$" },
            "SelfPay": {}
        }"#,
    )
    .expect("valid rules")
}

pub(super) fn clean_record() -> IntakeRecord {
    IntakeRecord {
        patient_id: "P-1001".to_string(),
        first_name: "Maria".to_string(),
        last_name: "Santos".to_string(),
        dob: "04/12/1987".to_string(),
        service_date: "06/01/2025".to_string(),
        phone: "(515) 555-0142".to_string(),
        address: "12 Linden Ave".to_string(),
        state: "IA".to_string(),
        gender: "F".to_string(),
        insurance_provider: "BlueCross".to_string(),
        member_id: "ID-1234567890".to_string(),
        member_group: "G-123456".to_string(),
        extras: Vec::new(),
    }
}

pub(super) fn evaluate(record: &IntakeRecord) -> EvaluationResult {
    crate::workflows::eligibility::evaluate(record, &rule_set(), today())
}

/// Builds an already-evaluated entry for queue and summary tests, bypassing
/// the evaluator so reason lists can be arbitrary.
pub(super) fn evaluated_with(
    last_name: &str,
    first_name: &str,
    status: EligibilityStatus,
    reasons: &[&str],
) -> EvaluatedIntake {
    let record = IntakeRecord {
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        ..clean_record()
    };
    EvaluatedIntake {
        record,
        result: EvaluationResult {
            status,
            reasons: reasons.iter().map(|code| code.to_string()).collect(),
            used_remote: false,
            adapter_error: None,
        },
    }
}
