use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::super::domain::{EligibilityStatus, IntakeRecord};

/// Payload posted to the payer eligibility endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub insurance_provider: String,
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub member_group: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub service_date: String,
}

impl EligibilityRequest {
    pub fn from_record(record: &IntakeRecord) -> Self {
        Self {
            insurance_provider: record.insurance_provider.trim().to_string(),
            member_id: record.member_id.trim().to_string(),
            member_group: record.member_group.trim().to_string(),
            dob: record.dob.trim().to_string(),
            service_date: record.service_date.trim().to_string(),
        }
    }
}

/// Status and reason codes adopted verbatim from the payer response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDecision {
    pub status: EligibilityStatus,
    pub reasons: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    #[error("eligibility api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("eligibility api returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Thin HTTP client for the payer eligibility endpoint. One attempt per
/// record, bounded by the configured timeout; retries are the caller's call.
#[derive(Debug, Clone)]
pub struct RemoteEligibilityClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RemoteEligibilityClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteCallError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn check(&self, record: &IntakeRecord) -> Result<RemoteDecision, RemoteCallError> {
        let url = format!("{}/eligibility", self.base_url.trim_end_matches('/'));
        let request = EligibilityRequest::from_record(record);

        let body: Value = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        decode_decision(&body)
    }
}

/// Interprets the response body. An absent or null status means the payer
/// could not decide, which maps to REVIEW; any other non-string status is
/// malformed. Reason entries are coerced to strings and empties dropped.
fn decode_decision(body: &Value) -> Result<RemoteDecision, RemoteCallError> {
    let status_token = match body.get("status") {
        None | Some(Value::Null) => "REVIEW".to_string(),
        Some(Value::String(token)) => token.clone(),
        Some(other) => {
            return Err(RemoteCallError::MalformedResponse(format!(
                "status must be a string, got {other}"
            )))
        }
    };

    let status = EligibilityStatus::parse(&status_token).ok_or_else(|| {
        RemoteCallError::MalformedResponse(format!("unrecognized status '{status_token}'"))
    })?;

    let reasons = match body.get("reasons") {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| match entry {
                Value::String(code) => code.trim().to_string(),
                other => other.to_string(),
            })
            .filter(|code| !code.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    Ok(RemoteDecision { status, reasons })
}
