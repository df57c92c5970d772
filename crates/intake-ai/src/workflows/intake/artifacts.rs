use chrono::{DateTime, Local, NaiveDate};
use std::path::{Path, PathBuf};

use super::parser::REQUIRED_COLUMNS;
use super::RunError;
use crate::workflows::eligibility::{
    BatchSummary, EvaluatedIntake, IntakeRecord, QueueDomain, WorkQueueEntry,
};

/// Identity of one run: a single timestamp reused in every artifact name,
/// and the month folder the artifacts land in. Built once at run start and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct RunContext {
    timestamp: String,
    output_dir: PathBuf,
    today: NaiveDate,
}

impl RunContext {
    pub fn new(outputs_root: &Path, now: DateTime<Local>) -> Self {
        let timestamp = now.format("%Y-%m-%d_%H%M%S").to_string();
        let month = now.format("%Y-%m").to_string();
        Self {
            timestamp,
            output_dir: outputs_root.join(month),
            today: now.date_naive(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The run's evaluation date, shared by every record in the batch.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn ensure_output_dir(&self) -> Result<(), RunError> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    pub fn results_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("eligibility_results_{}.csv", self.timestamp))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("eligibility_summary_{}.json", self.timestamp))
    }

    pub fn queue_path(&self, domain: QueueDomain) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.csv", domain.file_stem(), self.timestamp))
    }

    pub fn archived_input_path(&self) -> PathBuf {
        self.output_dir.join(format!("input_{}.csv", self.timestamp))
    }

    /// Copies the raw input file into the run folder for audit continuity.
    pub fn archive_input(&self, input: &Path) -> Result<PathBuf, RunError> {
        let target = self.archived_input_path();
        std::fs::copy(input, &target)?;
        Ok(target)
    }
}

/// Record columns in queue artifacts, identification first.
const QUEUE_RECORD_COLUMNS: [&str; 12] = [
    "patient_id",
    "last_name",
    "first_name",
    "dob",
    "service_date",
    "insurance_provider",
    "member_id",
    "member_group",
    "phone",
    "address",
    "state",
    "gender",
];

fn record_field<'a>(record: &'a IntakeRecord, column: &str) -> &'a str {
    match column {
        "service_date" => &record.service_date,
        "dob" => &record.dob,
        "last_name" => &record.last_name,
        "first_name" => &record.first_name,
        "phone" => &record.phone,
        "address" => &record.address,
        "state" => &record.state,
        "gender" => &record.gender,
        "insurance_provider" => &record.insurance_provider,
        "patient_id" => &record.patient_id,
        "member_id" => &record.member_id,
        "member_group" => &record.member_group,
        _ => "",
    }
}

fn extra_value<'a>(record: &'a IntakeRecord, column: &str) -> &'a str {
    record
        .extras
        .iter()
        .find(|(name, _)| name == column)
        .map(|(_, value)| value.as_str())
        .unwrap_or_default()
}

fn api_used_label(used_remote: bool) -> &'static str {
    if used_remote {
        "YES"
    } else {
        "NO"
    }
}

/// Writes the full results table: record columns, passthrough extras, then
/// the decision columns. The api columns appear only for remote-mode runs.
pub(crate) fn write_results_csv(
    path: &Path,
    evaluated: &[EvaluatedIntake],
    extra_columns: &[String],
    remote_mode: bool,
) -> Result<(), RunError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    header.extend(extra_columns.iter().map(String::as_str));
    header.push("status");
    header.push("reasons");
    if remote_mode {
        header.push("api_used");
        header.push("api_error");
    }
    writer.write_record(&header)?;

    for entry in evaluated {
        let mut row: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .map(|column| record_field(&entry.record, column).to_string())
            .collect();
        for column in extra_columns {
            row.push(extra_value(&entry.record, column).to_string());
        }
        row.push(entry.result.status.label().to_string());
        row.push(entry.result.reasons.join("|"));
        if remote_mode {
            row.push(api_used_label(entry.result.used_remote).to_string());
            row.push(entry.result.adapter_error.clone().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes one desk's queue with its working columns up front.
pub(crate) fn write_queue_csv(
    path: &Path,
    entries: &[WorkQueueEntry],
    extra_columns: &[String],
    remote_mode: bool,
) -> Result<(), RunError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = vec!["status", "priority", "owner_queue", "next_action"];
    header.extend(QUEUE_RECORD_COLUMNS);
    if remote_mode {
        header.push("api_used");
    }
    header.push("domain_reasons");
    header.push("reasons");
    if remote_mode {
        header.push("api_error");
    }
    header.extend(extra_columns.iter().map(String::as_str));
    writer.write_record(&header)?;

    for entry in entries {
        let mut row: Vec<String> = vec![
            entry.status.label().to_string(),
            entry.priority.label().to_string(),
            entry.domain.owner_label().to_string(),
            entry.next_action.clone(),
        ];
        row.extend(
            QUEUE_RECORD_COLUMNS
                .iter()
                .map(|column| record_field(&entry.record, column).to_string()),
        );
        if remote_mode {
            row.push(api_used_label(entry.used_remote).to_string());
        }
        row.push(entry.domain_reasons.join("|"));
        row.push(entry.reasons.join("|"));
        if remote_mode {
            row.push(entry.adapter_error.clone().unwrap_or_default());
        }
        for column in extra_columns {
            row.push(extra_value(&entry.record, column).to_string());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

pub(crate) fn write_summary_json(path: &Path, summary: &BatchSummary) -> Result<(), RunError> {
    let rendered = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn artifact_names_share_one_timestamp() {
        let now = Local.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap();
        let ctx = RunContext::new(Path::new("outputs"), now);

        assert_eq!(ctx.timestamp(), "2025-06-15_093000");
        assert_eq!(ctx.output_dir(), Path::new("outputs/2025-06"));
        assert_eq!(
            ctx.results_path(),
            Path::new("outputs/2025-06/eligibility_results_2025-06-15_093000.csv")
        );
        assert_eq!(
            ctx.summary_path(),
            Path::new("outputs/2025-06/eligibility_summary_2025-06-15_093000.json")
        );
        assert_eq!(
            ctx.queue_path(QueueDomain::Registration),
            Path::new("outputs/2025-06/registration_queue_2025-06-15_093000.csv")
        );
        assert_eq!(
            ctx.queue_path(QueueDomain::Insurance),
            Path::new("outputs/2025-06/insurance_queue_2025-06-15_093000.csv")
        );
        assert_eq!(
            ctx.archived_input_path(),
            Path::new("outputs/2025-06/input_2025-06-15_093000.csv")
        );
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    }

    #[test]
    fn results_header_gains_api_columns_only_in_remote_mode() {
        let dir = tempfile::tempdir().expect("temp dir");

        let local_path = dir.path().join("local.csv");
        write_results_csv(&local_path, &[], &["referral_source".to_string()], false)
            .expect("written");
        let local_header = std::fs::read_to_string(&local_path).expect("readable");
        assert!(local_header.trim_end().ends_with("referral_source,status,reasons"));

        let remote_path = dir.path().join("remote.csv");
        write_results_csv(&remote_path, &[], &[], true).expect("written");
        let remote_header = std::fs::read_to_string(&remote_path).expect("readable");
        assert!(remote_header
            .trim_end()
            .ends_with("status,reasons,api_used,api_error"));
    }
}
