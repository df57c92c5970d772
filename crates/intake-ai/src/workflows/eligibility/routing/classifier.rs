use super::super::domain::{reason, QueueDomain};

/// Codes the insurance desk owns outright.
const INSURANCE_EXACT: [&str; 6] = [
    reason::PAYER_NOT_SUPPORTED,
    reason::MISSING_MEMBER_ID,
    reason::MEMBER_ID_INVALID_FORMAT,
    reason::MISSING_MEMBER_GROUP,
    reason::MEMBER_GROUP_INVALID_FORMAT,
    reason::COVERAGE_POSSIBLY_INACTIVE,
];

/// Codes the registration desk owns outright.
const REGISTRATION_EXACT: [&str; 1] = [reason::PHONE_INVALID_LENGTH];

/// Code families for identity and date faults, all registration work.
const REGISTRATION_PREFIXES: [&str; 3] = ["MISSING_", "DOB_", "SERVICE_DATE_"];

/// Assigns each reason code on a record to the desk that can act on it.
#[derive(Debug, Clone, Copy)]
pub struct ReasonClassifier {
    route_fallback_to_insurance: bool,
}

impl ReasonClassifier {
    /// In a remote run the fallback flag marks a payer connectivity problem,
    /// which the insurance desk owns. In a local-only run the code can only
    /// have come in on the input, so it is treated as registration data.
    pub const fn new(remote_mode: bool) -> Self {
        Self {
            route_fallback_to_insurance: remote_mode,
        }
    }

    /// Splits reason codes between the two desks, preserving their order.
    /// Blank entries are skipped; unknown codes are never dropped.
    pub fn classify(&self, reasons: &[String]) -> DomainReasons {
        let mut split = DomainReasons::default();
        for code in reasons {
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            match self.domain_for(code) {
                QueueDomain::Registration => split.registration.push(code.to_string()),
                QueueDomain::Insurance => split.insurance.push(code.to_string()),
            }
        }
        split
    }

    fn domain_for(&self, code: &str) -> QueueDomain {
        if INSURANCE_EXACT.contains(&code) {
            return QueueDomain::Insurance;
        }
        if code == reason::API_FALLBACK_USED {
            return if self.route_fallback_to_insurance {
                QueueDomain::Insurance
            } else {
                QueueDomain::Registration
            };
        }
        if REGISTRATION_EXACT.contains(&code)
            || REGISTRATION_PREFIXES
                .iter()
                .any(|prefix| code.starts_with(prefix))
        {
            return QueueDomain::Registration;
        }
        // unknown codes stay on the registration desk
        QueueDomain::Registration
    }
}

/// A record's reason codes split by owning desk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainReasons {
    pub registration: Vec<String>,
    pub insurance: Vec<String>,
}

impl DomainReasons {
    pub fn for_domain(&self, domain: QueueDomain) -> &[String] {
        match domain {
            QueueDomain::Registration => &self.registration,
            QueueDomain::Insurance => &self.insurance,
        }
    }
}
