use std::path::Path;

use super::common::evaluated_with;
use crate::workflows::eligibility::domain::EligibilityStatus;
use crate::workflows::eligibility::summarize;

#[test]
fn counts_and_percentages_cover_every_status() {
    let evaluated = vec![
        evaluated_with("Santos", "Maria", EligibilityStatus::Approved, &[]),
        evaluated_with("Reyes", "Luis", EligibilityStatus::Approved, &[]),
        evaluated_with(
            "Klein",
            "Ana",
            EligibilityStatus::Review,
            &["PHONE_INVALID_LENGTH"],
        ),
        evaluated_with(
            "Okafor",
            "Chidi",
            EligibilityStatus::Rejected,
            &["MISSING_STATE"],
        ),
    ];

    let summary = summarize(&evaluated, false, "2025-06-15_093000", Path::new("outputs/2025-06"));

    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.status_counts.approved, 2);
    assert_eq!(summary.status_counts.review, 1);
    assert_eq!(summary.status_counts.rejected, 1);
    assert_eq!(summary.percent_approved, 50.0);
    assert_eq!(summary.percent_review, 25.0);
    assert_eq!(summary.percent_rejected, 25.0);
    assert_eq!(summary.generated_at, "2025-06-15_093000");
    assert_eq!(summary.output_folder, "outputs/2025-06");
}

#[test]
fn empty_batch_reports_zeros_not_faults() {
    let summary = summarize(&[], false, "2025-06-15_093000", Path::new("outputs/2025-06"));

    assert_eq!(summary.total_records, 0);
    assert_eq!(summary.percent_approved, 0.0);
    assert_eq!(summary.percent_review, 0.0);
    assert_eq!(summary.percent_rejected, 0.0);
    assert!(summary.top_reasons.is_empty());
    assert!(summary.api_used_counts.is_none());
}

#[test]
fn thirds_round_to_two_decimals() {
    let evaluated = vec![
        evaluated_with("Santos", "Maria", EligibilityStatus::Approved, &[]),
        evaluated_with(
            "Klein",
            "Ana",
            EligibilityStatus::Review,
            &["PHONE_INVALID_LENGTH"],
        ),
        evaluated_with(
            "Reyes",
            "Luis",
            EligibilityStatus::Review,
            &["PAYER_NOT_SUPPORTED"],
        ),
    ];

    let summary = summarize(&evaluated, false, "ts", Path::new("out"));

    assert_eq!(summary.percent_approved, 33.33);
    assert_eq!(summary.percent_review, 66.67);
    assert_eq!(summary.percent_rejected, 0.0);
}

#[test]
fn top_reasons_rank_by_count_then_first_seen() {
    let evaluated = vec![
        evaluated_with(
            "Santos",
            "Maria",
            EligibilityStatus::Rejected,
            &["MISSING_STATE", "PHONE_INVALID_LENGTH"],
        ),
        evaluated_with(
            "Klein",
            "Ana",
            EligibilityStatus::Rejected,
            &["MISSING_STATE", "PHONE_INVALID_LENGTH"],
        ),
        evaluated_with(
            "Reyes",
            "Luis",
            EligibilityStatus::Review,
            &["PAYER_NOT_SUPPORTED", ""],
        ),
    ];

    let summary = summarize(&evaluated, false, "ts", Path::new("out"));

    let ranked: Vec<(&str, usize)> = summary
        .top_reasons
        .iter()
        .map(|entry| (entry.code.as_str(), entry.count))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("MISSING_STATE", 2),
            ("PHONE_INVALID_LENGTH", 2),
            ("PAYER_NOT_SUPPORTED", 1),
        ]
    );
}

#[test]
fn top_reasons_are_bounded_to_ten() {
    let codes: Vec<String> = (0..12).map(|i| format!("CODE_{i}")).collect();
    let mut evaluated: Vec<_> = codes
        .iter()
        .map(|code| {
            evaluated_with("Smith", "Jo", EligibilityStatus::Review, &[code.as_str()])
        })
        .collect();
    evaluated.push(evaluated_with(
        "Smith",
        "Jo",
        EligibilityStatus::Review,
        &["CODE_7"],
    ));

    let summary = summarize(&evaluated, false, "ts", Path::new("out"));

    assert_eq!(summary.top_reasons.len(), 10);
    assert_eq!(summary.top_reasons[0].code, "CODE_7");
    assert_eq!(summary.top_reasons[0].count, 2);
    // singles keep first-seen order after the repeated code
    assert_eq!(summary.top_reasons[1].code, "CODE_0");
    assert_eq!(summary.top_reasons[9].code, "CODE_9");
}

#[test]
fn remote_usage_is_reported_only_in_remote_mode() {
    let mut adopted = evaluated_with("Santos", "Maria", EligibilityStatus::Approved, &[]);
    adopted.result.used_remote = true;
    let evaluated = vec![
        adopted,
        evaluated_with(
            "Klein",
            "Ana",
            EligibilityStatus::Review,
            &["API_FALLBACK_USED"],
        ),
        evaluated_with("Reyes", "Luis", EligibilityStatus::Approved, &[]),
    ];

    let remote = summarize(&evaluated, true, "ts", Path::new("out"));
    let counts = remote.api_used_counts.expect("remote counts present");
    assert_eq!(counts.yes, 1);
    assert_eq!(counts.no, 2);

    let remote_json = serde_json::to_value(&remote).expect("serializable");
    assert_eq!(remote_json["api_used_counts"]["YES"], 1);
    assert_eq!(remote_json["api_used_counts"]["NO"], 2);

    let local = summarize(&evaluated, false, "ts", Path::new("out"));
    assert!(local.api_used_counts.is_none());
    let local_json = serde_json::to_value(&local).expect("serializable");
    assert!(local_json.get("api_used_counts").is_none());
    assert_eq!(local_json["status_counts"]["APPROVED"], 2);
}
