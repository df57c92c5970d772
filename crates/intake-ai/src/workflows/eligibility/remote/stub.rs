use axum::routing::post;
use axum::{Json, Router};
use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::super::domain::reason;
use super::super::rules::SELF_PAY;
use super::client::EligibilityRequest;

/// Payers the stub recognizes. Anything else comes back PAYER_NOT_SUPPORTED.
pub const STUB_SUPPORTED_PAYERS: [&str; 5] = ["Kaiser", "Aetna", "BlueCross", "United", "SelfPay"];

fn member_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^ID-\d{10}$").expect("valid stub pattern"))
}

fn group_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^G-\d{6,9}$").expect("valid stub pattern"))
}

/// Body returned by the stub endpoint. Coverage metadata is canned; only
/// status and reasons vary with the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub status: String,
    pub reasons: Vec<String>,
    pub payer: String,
    pub plan: String,
    pub effective_date: String,
    pub termination_date: Option<String>,
    pub reference_id: String,
}

/// Router serving the stand-in payer endpoint, used for demos and for
/// exercising the remote adapter without a real clearinghouse.
pub fn payer_stub_router() -> Router {
    Router::new().route("/eligibility", post(check_eligibility))
}

async fn check_eligibility(Json(request): Json<EligibilityRequest>) -> Json<EligibilityResponse> {
    Json(stub_decision(&request))
}

/// Pure decision logic behind the endpoint. Unlike the local rules, the stub
/// always requires a group number for non-self-pay payers.
pub fn stub_decision(request: &EligibilityRequest) -> EligibilityResponse {
    let payer = request.insurance_provider.trim();
    let member_id = request.member_id.trim();
    let member_group = request.member_group.trim();

    let mut reasons = Vec::new();

    if payer.is_empty() {
        reasons.push("MISSING_INSURANCE_PROVIDER".to_string());
    } else if !STUB_SUPPORTED_PAYERS.contains(&payer) {
        reasons.push(reason::PAYER_NOT_SUPPORTED.to_string());
    }

    if !payer.is_empty() && payer != SELF_PAY {
        if member_id.is_empty() {
            reasons.push(reason::MISSING_MEMBER_ID.to_string());
        } else if !member_id_pattern().is_match(member_id) {
            reasons.push(reason::MEMBER_ID_INVALID_FORMAT.to_string());
        }

        if member_group.is_empty() {
            reasons.push(reason::MISSING_MEMBER_GROUP.to_string());
        } else if !group_pattern().is_match(member_group) {
            reasons.push(reason::MEMBER_GROUP_INVALID_FORMAT.to_string());
        }
    }

    let status = if reasons.iter().any(|code| code.starts_with("MISSING_")) {
        "REJECTED"
    } else if !reasons.is_empty() {
        "REVIEW"
    } else {
        "APPROVED"
    };

    let today = Local::now().date_naive();
    let effective_date = NaiveDate::from_ymd_opt(today.year(), 1, 1)
        .expect("valid date")
        .to_string();
    let reference = if member_id.is_empty() {
        "SELF"
    } else {
        member_id
    };

    EligibilityResponse {
        status: status.to_string(),
        reasons,
        payer: payer.to_string(),
        plan: "MOCK-HMO".to_string(),
        effective_date,
        termination_date: None,
        reference_id: format!("MOCK-{reference}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payer: &str, member_id: &str, member_group: &str) -> EligibilityRequest {
        EligibilityRequest {
            insurance_provider: payer.to_string(),
            member_id: member_id.to_string(),
            member_group: member_group.to_string(),
            dob: "04/12/1987".to_string(),
            service_date: "06/01/2025".to_string(),
        }
    }

    #[test]
    fn valid_credentials_are_approved() {
        let response = stub_decision(&request("Kaiser", "ID-1234567890", "G-123456"));
        assert_eq!(response.status, "APPROVED");
        assert!(response.reasons.is_empty());
        assert_eq!(response.plan, "MOCK-HMO");
        assert_eq!(response.reference_id, "MOCK-ID-1234567890");
    }

    #[test]
    fn self_pay_skips_credential_checks() {
        let response = stub_decision(&request("SelfPay", "", ""));
        assert_eq!(response.status, "APPROVED");
        assert_eq!(response.reference_id, "MOCK-SELF");
    }

    #[test]
    fn missing_provider_is_rejected() {
        let response = stub_decision(&request("", "ID-1234567890", "G-123456"));
        assert_eq!(response.status, "REJECTED");
        assert_eq!(response.reasons, vec!["MISSING_INSURANCE_PROVIDER"]);
    }

    #[test]
    fn unknown_payer_goes_to_review() {
        let response = stub_decision(&request("Cigna", "ID-1234567890", "G-123456"));
        assert_eq!(response.status, "REVIEW");
        assert_eq!(response.reasons, vec![reason::PAYER_NOT_SUPPORTED]);
    }

    #[test]
    fn group_number_is_always_required() {
        let response = stub_decision(&request("BlueCross", "ID-1234567890", ""));
        assert_eq!(response.status, "REJECTED");
        assert_eq!(response.reasons, vec![reason::MISSING_MEMBER_GROUP]);
    }

    #[test]
    fn bad_formats_go_to_review() {
        let response = stub_decision(&request("United", "ID-123", "G-12"));
        assert_eq!(response.status, "REVIEW");
        assert_eq!(
            response.reasons,
            vec![
                reason::MEMBER_ID_INVALID_FORMAT,
                reason::MEMBER_GROUP_INVALID_FORMAT
            ]
        );
    }
}
