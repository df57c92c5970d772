use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::path::Path;

use intake_ai::error::AppError;
use intake_ai::workflows::eligibility::{
    build_queue, evaluate, summarize, EvaluatedIntake, IntakeRecord, PayerRuleSet, QueueDomain,
    ReasonClassifier, WorkQueueEntry,
};
use intake_ai::workflows::intake::RunError;

/// Payers the demo batch is checked against. Kaiser insists on a group
/// number and Aetna runs a short coverage window so both policies show up
/// in the output.
const DEMO_RULES: &str = r#"{
    "Kaiser": { "requires_group_number": true },
    "Aetna": { "active_coverage_days": 180 },
    "BlueCross": {},
    "United": { "member_id_regex": "^U-\\d{8}$" },
    "SelfPay": {}
}"#;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for coverage checks (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Include every record's decision in the output.
    #[arg(long)]
    pub(crate) list_records: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, list_records } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Patient intake eligibility demo");
    println!("Evaluation date: {today}");
    println!("Data source: built-in sample batch (local rules only, nothing is written)");

    let rules = PayerRuleSet::from_json(DEMO_RULES).map_err(RunError::from)?;
    let mut payers: Vec<&str> = rules.payer_names().collect();
    payers.sort_unstable();
    println!("Configured payers: {}", payers.join(", "));

    let evaluated: Vec<EvaluatedIntake> = demo_batch(today)
        .into_iter()
        .map(|record| {
            let result = evaluate(&record, &rules, today);
            EvaluatedIntake { record, result }
        })
        .collect();

    if list_records {
        println!("\nRecord decisions");
        for entry in &evaluated {
            let reasons = if entry.result.reasons.is_empty() {
                String::new()
            } else {
                format!(" ({})", entry.result.reasons.join("|"))
            };
            println!(
                "- {} {}, {}: {}{}",
                entry.record.patient_id,
                entry.record.last_name,
                entry.record.first_name,
                entry.result.status.label(),
                reasons
            );
        }
    }

    let classifier = ReasonClassifier::new(false);
    render_queue(
        "Registration queue",
        &build_queue(&evaluated, &classifier, QueueDomain::Registration),
    );
    render_queue(
        "Insurance queue",
        &build_queue(&evaluated, &classifier, QueueDomain::Insurance),
    );

    let generated_at = Local::now().format("%Y-%m-%d_%H%M%S").to_string();
    let summary = summarize(&evaluated, false, &generated_at, Path::new("(not written)"));
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("\nBatch summary payload:\n{json}"),
        Err(err) => println!("\nBatch summary unavailable: {err}"),
    }

    Ok(())
}

fn render_queue(label: &str, entries: &[WorkQueueEntry]) {
    if entries.is_empty() {
        println!("\n{label}: empty");
        return;
    }

    println!("\n{label} ({} entries)", entries.len());
    for entry in entries {
        println!(
            "- [{}] {}, {} ({}) -> {}",
            entry.priority.label(),
            entry.record.last_name,
            entry.record.first_name,
            entry.status.label(),
            entry.next_action
        );
        println!("    codes: {}", entry.domain_reasons.join("|"));
    }
}

/// A small batch covering the decision taxonomy: a clean approval, identity
/// and date faults, an unsupported payer, a missing group, a stale service
/// date and a self-pay patient. Service dates are derived from the
/// evaluation date so the coverage outcomes are stable on any day.
fn demo_batch(today: NaiveDate) -> Vec<IntakeRecord> {
    let recent = (today - Duration::days(7)).format("%m/%d/%Y").to_string();
    let stale = (today - Duration::days(200)).format("%m/%d/%Y").to_string();

    let base = IntakeRecord {
        dob: "04/12/1987".to_string(),
        service_date: recent,
        phone: "(515) 555-0142".to_string(),
        address: "12 Linden Ave".to_string(),
        state: "IA".to_string(),
        gender: "F".to_string(),
        insurance_provider: "BlueCross".to_string(),
        member_id: "ID-1234567890".to_string(),
        member_group: "G-123456".to_string(),
        ..IntakeRecord::default()
    };

    vec![
        IntakeRecord {
            patient_id: "P-1001".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            ..base.clone()
        },
        IntakeRecord {
            patient_id: "P-1002".to_string(),
            first_name: "Chidi".to_string(),
            last_name: "Okafor".to_string(),
            gender: "M".to_string(),
            state: String::new(),
            ..base.clone()
        },
        IntakeRecord {
            patient_id: "P-1003".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Klein".to_string(),
            insurance_provider: "Cigna".to_string(),
            ..base.clone()
        },
        IntakeRecord {
            patient_id: "P-1004".to_string(),
            first_name: "Ben".to_string(),
            last_name: "Adams".to_string(),
            gender: "M".to_string(),
            insurance_provider: "Kaiser".to_string(),
            member_group: String::new(),
            ..base.clone()
        },
        IntakeRecord {
            patient_id: "P-1005".to_string(),
            first_name: "Luis".to_string(),
            last_name: "Reyes".to_string(),
            gender: "M".to_string(),
            dob: "13/40/2024".to_string(),
            phone: "555-0199".to_string(),
            ..base.clone()
        },
        IntakeRecord {
            patient_id: "P-1006".to_string(),
            first_name: "Dana".to_string(),
            last_name: "Price".to_string(),
            insurance_provider: "Aetna".to_string(),
            service_date: stale,
            ..base.clone()
        },
        IntakeRecord {
            patient_id: "P-1007".to_string(),
            first_name: "Ken".to_string(),
            last_name: "Ito".to_string(),
            gender: "M".to_string(),
            insurance_provider: "SelfPay".to_string(),
            member_id: String::new(),
            member_group: String::new(),
            ..base
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_batch_spans_the_decision_taxonomy() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        let rules = PayerRuleSet::from_json(DEMO_RULES).expect("demo rules parse");

        let reasons: Vec<Vec<String>> = demo_batch(today)
            .iter()
            .map(|record| evaluate(record, &rules, today).reasons)
            .collect();

        assert!(reasons[0].is_empty(), "Santos should be clean: {reasons:?}");
        assert_eq!(reasons[1], vec!["MISSING_STATE"]);
        assert_eq!(reasons[2], vec!["PAYER_NOT_SUPPORTED"]);
        assert_eq!(reasons[3], vec!["MISSING_MEMBER_GROUP"]);
        assert_eq!(
            reasons[4],
            vec!["DOB_INVALID_DATE_FORMAT", "PHONE_INVALID_LENGTH"]
        );
        assert_eq!(reasons[5], vec!["COVERAGE_POSSIBLY_INACTIVE"]);
        assert!(reasons[6].is_empty(), "self-pay should be clean: {reasons:?}");
    }
}
