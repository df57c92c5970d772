use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use super::domain::{EligibilityStatus, EvaluatedIntake};

/// The summary never reports more reason codes than this.
const TOP_REASON_LIMIT: usize = 10;

/// Per-status record counts, serialized under the status labels.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    #[serde(rename = "APPROVED")]
    pub approved: usize,
    #[serde(rename = "REVIEW")]
    pub review: usize,
    #[serde(rename = "REJECTED")]
    pub rejected: usize,
}

/// How many records adopted a remote decision versus fell back or ran local.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct RemoteUsageCounts {
    #[serde(rename = "YES")]
    pub yes: usize,
    #[serde(rename = "NO")]
    pub no: usize,
}

/// One entry in the top-reasons table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReasonCount {
    pub code: String,
    pub count: usize,
}

/// Aggregate view over a processed batch, written as the run's summary JSON.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchSummary {
    pub total_records: usize,
    pub status_counts: StatusCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_used_counts: Option<RemoteUsageCounts>,
    pub percent_approved: f64,
    pub percent_review: f64,
    pub percent_rejected: f64,
    /// Most frequent reason codes, highest count first. Ties keep the order
    /// the codes were first seen in the batch.
    pub top_reasons: Vec<ReasonCount>,
    pub generated_at: String,
    pub output_folder: String,
}

/// Computes the batch summary from the full evaluated set. Remote usage is
/// reported only for remote-mode runs; a local run omits the section rather
/// than printing a column of zeros.
pub fn summarize(
    evaluated: &[EvaluatedIntake],
    remote_mode: bool,
    generated_at: &str,
    output_folder: &Path,
) -> BatchSummary {
    let total = evaluated.len();

    let mut status_counts = StatusCounts::default();
    let mut usage = RemoteUsageCounts::default();
    for entry in evaluated {
        match entry.result.status {
            EligibilityStatus::Approved => status_counts.approved += 1,
            EligibilityStatus::Review => status_counts.review += 1,
            EligibilityStatus::Rejected => status_counts.rejected += 1,
        }
        if entry.result.used_remote {
            usage.yes += 1;
        } else {
            usage.no += 1;
        }
    }

    BatchSummary {
        total_records: total,
        status_counts,
        api_used_counts: remote_mode.then_some(usage),
        percent_approved: percent(status_counts.approved, total),
        percent_review: percent(status_counts.review, total),
        percent_rejected: percent(status_counts.rejected, total),
        top_reasons: top_reasons(evaluated),
        generated_at: generated_at.to_string(),
        output_folder: output_folder.display().to_string(),
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

fn top_reasons(evaluated: &[EvaluatedIntake]) -> Vec<ReasonCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for entry in evaluated {
        for code in &entry.result.reasons {
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            let slot = counts.entry(code).or_insert(0);
            if *slot == 0 {
                first_seen.push(code);
            }
            *slot += 1;
        }
    }

    let mut ranked: Vec<ReasonCount> = first_seen
        .into_iter()
        .map(|code| ReasonCount {
            code: code.to_string(),
            count: counts[code],
        })
        .collect();
    // stable sort keeps first-seen order within equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_REASON_LIMIT);
    ranked
}
