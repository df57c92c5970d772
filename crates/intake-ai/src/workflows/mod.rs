pub mod eligibility;
pub mod intake;
