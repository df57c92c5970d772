use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Payer name treated as self-pay: identity and date checks still apply but
/// member credentials and coverage recency are never validated.
pub const SELF_PAY: &str = "SelfPay";

const DEFAULT_MEMBER_ID_PATTERN: &str = r"^ID-\d{10}$";
const DEFAULT_GROUP_PATTERN: &str = r"^G-\d{6,9}$";
const DEFAULT_ACTIVE_COVERAGE_DAYS: i64 = 365;

fn default_member_id_pattern() -> String {
    DEFAULT_MEMBER_ID_PATTERN.to_string()
}

fn default_group_pattern() -> String {
    DEFAULT_GROUP_PATTERN.to_string()
}

fn default_active_coverage_days() -> i64 {
    DEFAULT_ACTIVE_COVERAGE_DAYS
}

/// On-disk shape of one payer entry; every field is optional.
#[derive(Debug, Clone, Deserialize)]
struct RawPayerRule {
    #[serde(default = "default_member_id_pattern")]
    member_id_regex: String,
    #[serde(default = "default_group_pattern")]
    group_regex: String,
    #[serde(default)]
    requires_group_number: bool,
    #[serde(default = "default_active_coverage_days")]
    active_coverage_days: i64,
}

/// Validation policy for one payer, patterns compiled once at load.
#[derive(Debug, Clone)]
pub struct PayerRule {
    pub member_id_regex: Regex,
    pub group_regex: Regex,
    pub requires_group_number: bool,
    pub active_coverage_days: i64,
}

impl PayerRule {
    fn compile(payer: &str, raw: RawPayerRule) -> Result<Self, RulesError> {
        let member_id_regex =
            Regex::new(&raw.member_id_regex).map_err(|source| RulesError::InvalidPattern {
                payer: payer.to_string(),
                field: "member_id_regex",
                source,
            })?;
        let group_regex =
            Regex::new(&raw.group_regex).map_err(|source| RulesError::InvalidPattern {
                payer: payer.to_string(),
                field: "group_regex",
                source,
            })?;

        Ok(Self {
            member_id_regex,
            group_regex,
            requires_group_number: raw.requires_group_number,
            active_coverage_days: raw.active_coverage_days,
        })
    }
}

/// All configured payers, keyed by the exact provider name records carry.
#[derive(Debug, Clone, Default)]
pub struct PayerRuleSet {
    payers: BTreeMap<String, PayerRule>,
}

impl PayerRuleSet {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, RulesError> {
        let parsed: BTreeMap<String, RawPayerRule> = serde_json::from_str(raw)?;

        let mut payers = BTreeMap::new();
        for (payer, rule) in parsed {
            let compiled = PayerRule::compile(&payer, rule)?;
            payers.insert(payer, compiled);
        }

        Ok(Self { payers })
    }

    pub fn get(&self, payer: &str) -> Option<&PayerRule> {
        self.payers.get(payer)
    }

    pub fn contains(&self, payer: &str) -> bool {
        self.payers.contains_key(payer)
    }

    pub fn payer_names(&self) -> impl Iterator<Item = &str> {
        self.payers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.payers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payers.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rules JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field} for payer '{payer}': {source}")]
    InvalidPattern {
        payer: String,
        field: &'static str,
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entries_get_full_defaults() {
        let rules = PayerRuleSet::from_json(r#"{ "BlueCross": {} }"#).expect("valid rules");
        let payer = rules.get("BlueCross").expect("payer present");

        assert!(payer.member_id_regex.is_match("ID-1234567890"));
        assert!(!payer.member_id_regex.is_match("ID-123"));
        assert!(payer.group_regex.is_match("G-123456"));
        assert!(payer.group_regex.is_match("G-123456789"));
        assert!(!payer.group_regex.is_match("G-12345"));
        assert!(!payer.requires_group_number);
        assert_eq!(payer.active_coverage_days, 365);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let rules = PayerRuleSet::from_json(
            r#"{
                "United": {
                    "member_id_regex": "^U-\\d{8}$",
                    "requires_group_number": true,
                    "active_coverage_days": 180
                }
            }"#,
        )
        .expect("valid rules");
        let payer = rules.get("United").expect("payer present");

        assert!(payer.member_id_regex.is_match("U-12345678"));
        assert!(!payer.member_id_regex.is_match("ID-1234567890"));
        assert!(payer.requires_group_number);
        assert_eq!(payer.active_coverage_days, 180);
    }

    #[test]
    fn unknown_payer_lookups_miss() {
        let rules = PayerRuleSet::from_json(r#"{ "Kaiser": {} }"#).expect("valid rules");
        assert!(rules.get("Cigna").is_none());
        assert!(!rules.contains("Cigna"));
        assert!(rules.contains("Kaiser"));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn bad_pattern_is_a_load_error() {
        let error = PayerRuleSet::from_json(r#"{ "Kaiser": { "group_regex": "[unclosed" } }"#)
            .expect_err("pattern rejected");
        match error {
            RulesError::InvalidPattern { payer, field, .. } => {
                assert_eq!(payer, "Kaiser");
                assert_eq!(field, "group_regex");
            }
            other => panic!("expected pattern error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        assert!(matches!(
            PayerRuleSet::from_json("not json"),
            Err(RulesError::Json(_))
        ));
    }
}
