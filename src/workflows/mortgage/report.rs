use serde::{Deserialize, Serialize};

use super::domain::ApplicantProfile;
use super::evaluation::BankDecision;

/// Aggregated evaluation result handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub profile: ApplicantProfile,
    pub eligible_count: usize,
    pub alternative_count: usize,
    pub ineligible_count: usize,
    pub decisions: Vec<BankDecision>,
}

impl EligibilityReport {
    pub fn new(profile: ApplicantProfile, decisions: Vec<BankDecision>) -> Self {
        let eligible_count = decisions.iter().filter(|d| d.is_eligible()).count();
        let alternative_count = decisions.iter().filter(|d| d.is_alternative_offer()).count();
        let ineligible_count = decisions.len() - eligible_count - alternative_count;

        Self {
            profile,
            eligible_count,
            alternative_count,
            ineligible_count,
            decisions,
        }
    }

    pub fn eligible(&self) -> impl Iterator<Item = &BankDecision> {
        self.decisions.iter().filter(|d| d.is_eligible())
    }

    pub fn alternatives(&self) -> impl Iterator<Item = &BankDecision> {
        self.decisions.iter().filter(|d| d.is_alternative_offer())
    }

    pub fn ineligible(&self) -> impl Iterator<Item = &BankDecision> {
        self.decisions
            .iter()
            .filter(|d| !d.is_eligible() && !d.is_alternative_offer())
    }

    /// True when at least one bank approves the amount as requested.
    pub fn qualifies_anywhere(&self) -> bool {
        self.eligible_count > 0
    }

    pub fn summary(&self) -> String {
        match (self.eligible_count, self.alternative_count) {
            (0, 0) => format!(
                "no bank approves the request ({} of {} declined)",
                self.ineligible_count,
                self.decisions.len()
            ),
            (0, offers) => format!("no bank approves the request; {offers} alternative offer(s)"),
            (eligible, 0) => format!("{eligible} of {} bank(s) approve", self.decisions.len()),
            (eligible, offers) => format!(
                "{eligible} of {} bank(s) approve; {offers} alternative offer(s)",
                self.decisions.len()
            ),
        }
    }
}
