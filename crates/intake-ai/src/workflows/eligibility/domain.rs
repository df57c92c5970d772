/// Machine-readable reason codes attached to evaluation results.
///
/// Date faults are composed at the check site (`DOB_` / `SERVICE_DATE_` plus
/// the fault code), so only the standalone codes live here.
pub mod reason {
    pub const PHONE_INVALID_LENGTH: &str = "PHONE_INVALID_LENGTH";
    pub const PAYER_NOT_SUPPORTED: &str = "PAYER_NOT_SUPPORTED";
    pub const MISSING_MEMBER_ID: &str = "MISSING_MEMBER_ID";
    pub const MEMBER_ID_INVALID_FORMAT: &str = "MEMBER_ID_INVALID_FORMAT";
    pub const MISSING_MEMBER_GROUP: &str = "MISSING_MEMBER_GROUP";
    pub const MEMBER_GROUP_INVALID_FORMAT: &str = "MEMBER_GROUP_INVALID_FORMAT";
    pub const COVERAGE_POSSIBLY_INACTIVE: &str = "COVERAGE_POSSIBLY_INACTIVE";
    pub const API_FALLBACK_USED: &str = "API_FALLBACK_USED";

    /// Any reason starting with one of these forces a rejection.
    pub const HARD_REJECT_PREFIXES: [&str; 3] = ["MISSING_", "DOB_", "SERVICE_DATE_"];
}

/// One intake row exactly as captured from the export: raw text, empty
/// string for absent values. Validation happens downstream so a bad field
/// never blocks ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeRecord {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub service_date: String,
    pub phone: String,
    pub address: String,
    pub state: String,
    pub gender: String,
    pub insurance_provider: String,
    pub member_id: String,
    pub member_group: String,
    /// Extra input columns passed through untouched, in input order.
    pub extras: Vec<(String, String)>,
}

/// Three-state outcome every evaluation resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityStatus {
    Approved,
    Review,
    Rejected,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Approved => "APPROVED",
            EligibilityStatus::Review => "REVIEW",
            EligibilityStatus::Rejected => "REJECTED",
        }
    }

    /// Case-insensitive parse of a status token; `None` for anything
    /// outside the three-state universe.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "APPROVED" => Some(EligibilityStatus::Approved),
            "REVIEW" => Some(EligibilityStatus::Review),
            "REJECTED" => Some(EligibilityStatus::Rejected),
            _ => None,
        }
    }
}

/// Outcome of evaluating a single record. Reasons keep the order the checks
/// ran in, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    pub status: EligibilityStatus,
    pub reasons: Vec<String>,
    /// True only when a remote decision was adopted.
    pub used_remote: bool,
    /// Description of the remote failure when the run fell back to local rules.
    pub adapter_error: Option<String>,
}

/// A record paired with its evaluation, the unit every downstream consumer
/// (queues, summary, artifacts) works from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedIntake {
    pub record: IntakeRecord,
    pub result: EvaluationResult,
}

/// Follow-up urgency for a work-queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
        }
    }

    /// Sort rank, lower is more urgent.
    pub const fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
        }
    }
}

/// The desk that owns a reason code and works the resulting queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueDomain {
    Registration,
    Insurance,
}

impl QueueDomain {
    pub const fn owner_label(self) -> &'static str {
        match self {
            QueueDomain::Registration => "REGISTRATION",
            QueueDomain::Insurance => "INSURANCE",
        }
    }

    /// File stem for this desk's queue artifact.
    pub const fn file_stem(self) -> &'static str {
        match self {
            QueueDomain::Registration => "registration_queue",
            QueueDomain::Insurance => "insurance_queue",
        }
    }
}

/// One actionable row in a desk's work queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkQueueEntry {
    pub record: IntakeRecord,
    pub status: EligibilityStatus,
    pub domain: QueueDomain,
    pub priority: Priority,
    pub next_action: String,
    /// Reason codes owned by this desk, in evaluation order.
    pub domain_reasons: Vec<String>,
    /// The full reason list from the evaluation.
    pub reasons: Vec<String>,
    pub used_remote: bool,
    pub adapter_error: Option<String>,
}
