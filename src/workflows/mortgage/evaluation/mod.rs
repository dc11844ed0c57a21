pub mod amortization;
mod config;
mod policy;
mod rules;

pub use amortization::{calculate_monthly_payment, is_sustainable};
pub use config::{EvaluationConfig, DEFAULT_SUSTAINABILITY_RATIO};
pub use policy::{BankDecision, BankOutcome, IneligibilityReason};

use super::catalog::ConstraintCatalog;
use super::domain::{ApplicantProfile, ValidationError};
use policy::decide_outcome;
use tracing::debug;

/// Stateless evaluator applying every catalog bank to a single profile.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    config: EvaluationConfig,
}

impl EligibilityEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// One decision per bank, in catalog order.
    pub fn evaluate(
        &self,
        profile: &ApplicantProfile,
        catalog: &ConstraintCatalog,
    ) -> Result<Vec<BankDecision>, EvaluationError> {
        profile.validate()?;
        if catalog.is_empty() {
            return Err(EvaluationError::NoConstraintsAvailable);
        }

        let decisions = catalog
            .iter()
            .map(|bank| {
                let signals = rules::check_constraints(profile, bank);
                let max_loan_allowed = signals.max_loan_allowed;
                let required_down_payment = signals.required_down_payment;
                let outcome = decide_outcome(profile, bank, &self.config, signals);

                debug!(bank = %bank.name, outcome = outcome.label(), "bank evaluated");

                BankDecision {
                    bank: bank.clone(),
                    max_loan_allowed,
                    required_down_payment,
                    outcome,
                }
            })
            .collect();

        Ok(decisions)
    }
}

/// Evaluates with the default configuration (alternative offers disabled).
pub fn evaluate(
    profile: &ApplicantProfile,
    catalog: &ConstraintCatalog,
) -> Result<Vec<BankDecision>, EvaluationError> {
    EligibilityEvaluator::default().evaluate(profile, catalog)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("invalid applicant profile: {0}")]
    Validation(#[from] ValidationError),
    #[error("no bank constraints available")]
    NoConstraintsAvailable,
}
