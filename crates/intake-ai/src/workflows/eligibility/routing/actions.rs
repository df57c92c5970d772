use super::super::domain::{reason, Priority, QueueDomain};

/// How a rule recognizes a reason code.
#[derive(Debug, Clone, Copy)]
enum ReasonMatch {
    Exact(&'static str),
    Prefix(&'static str),
}

impl ReasonMatch {
    fn matches(self, code: &str) -> bool {
        match self {
            Self::Exact(token) => code == token,
            Self::Prefix(prefix) => code.starts_with(prefix),
        }
    }
}

/// One follow-up instruction and whether it escalates the entry to HIGH.
#[derive(Debug, Clone, Copy)]
struct ActionRule {
    trigger: ReasonMatch,
    action: &'static str,
    escalates: bool,
}

/// Registration desk playbook, applied in order. Each rule contributes its
/// action at most once no matter how many codes match it.
const REGISTRATION_RULES: [ActionRule; 4] = [
    ActionRule {
        trigger: ReasonMatch::Prefix("DOB_"),
        action: "Correct DOB (MM/DD/YYYY) and re-run intake",
        escalates: true,
    },
    ActionRule {
        trigger: ReasonMatch::Prefix("SERVICE_DATE_"),
        action: "Correct service date (MM/DD/YYYY) and re-run intake",
        escalates: true,
    },
    ActionRule {
        trigger: ReasonMatch::Prefix("MISSING_"),
        action: "Complete missing required intake fields (demographics/ID/insurance/provider/state)",
        escalates: false,
    },
    ActionRule {
        trigger: ReasonMatch::Exact(reason::PHONE_INVALID_LENGTH),
        action: "Verify phone number (10 digits)",
        escalates: false,
    },
];

/// Insurance desk playbook.
const INSURANCE_RULES: [ActionRule; 7] = [
    ActionRule {
        trigger: ReasonMatch::Exact(reason::API_FALLBACK_USED),
        action: "API unavailable - processed using local rules (verify eligibility manually if needed)",
        escalates: false,
    },
    ActionRule {
        trigger: ReasonMatch::Exact(reason::PAYER_NOT_SUPPORTED),
        action: "Payer not supported - collect alternate insurance or set SelfPay",
        escalates: true,
    },
    ActionRule {
        trigger: ReasonMatch::Exact(reason::MISSING_MEMBER_ID),
        action: "Collect member ID from insurance card",
        escalates: true,
    },
    ActionRule {
        trigger: ReasonMatch::Exact(reason::MEMBER_ID_INVALID_FORMAT),
        action: "Verify member ID format (ID-##########)",
        escalates: true,
    },
    ActionRule {
        trigger: ReasonMatch::Exact(reason::MISSING_MEMBER_GROUP),
        action: "Collect member group number (G-###### to G-#########)",
        escalates: false,
    },
    ActionRule {
        trigger: ReasonMatch::Exact(reason::MEMBER_GROUP_INVALID_FORMAT),
        action: "Verify member group number format (G-###### to G-#########)",
        escalates: false,
    },
    ActionRule {
        trigger: ReasonMatch::Exact(reason::COVERAGE_POSSIBLY_INACTIVE),
        action: "Verify active coverage in payer portal / call payer",
        escalates: true,
    },
];

const REGISTRATION_FALLBACK: &str = "Review intake record manually";
const INSURANCE_FALLBACK: &str = "Review insurance details manually";

/// Derives the joined next-action text and priority for one queue entry from
/// the desk's share of the reason codes. Returns the desk's manual-review
/// instruction at MEDIUM when no rule matches.
pub fn derive_actions(reasons: &[String], domain: QueueDomain) -> (String, Priority) {
    let (rules, fallback) = match domain {
        QueueDomain::Registration => (&REGISTRATION_RULES[..], REGISTRATION_FALLBACK),
        QueueDomain::Insurance => (&INSURANCE_RULES[..], INSURANCE_FALLBACK),
    };

    let mut actions = Vec::new();
    let mut priority = Priority::Medium;
    for rule in rules {
        if reasons.iter().any(|code| rule.trigger.matches(code)) {
            actions.push(rule.action);
            if rule.escalates {
                priority = Priority::High;
            }
        }
    }

    if actions.is_empty() {
        actions.push(fallback);
    }

    (actions.join("; "), priority)
}
