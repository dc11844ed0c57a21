use super::super::domain::{ApplicantProfile, BankConstraint, LoanOption};
use super::config::EvaluationConfig;
use super::rules::{price_loan_options, ConstraintSignals};
use serde::{Deserialize, Serialize};

/// Outcome of one bank's constraints against the requested loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BankOutcome {
    Eligible {
        loan_options: Vec<LoanOption>,
    },
    /// The request failed, but the bank would lend its maximum allowed amount.
    AlternativeOffer {
        offered_amount: f64,
        /// Down payment on `offered_amount`, not on the requested loan.
        offered_down_payment: f64,
        loan_options: Vec<LoanOption>,
        reasons: Vec<IneligibilityReason>,
    },
    Ineligible {
        reasons: Vec<IneligibilityReason>,
    },
}

impl BankOutcome {
    pub const fn label(&self) -> &'static str {
        match self {
            BankOutcome::Eligible { .. } => "eligible",
            BankOutcome::AlternativeOffer { .. } => "alternative_offer",
            BankOutcome::Ineligible { .. } => "ineligible",
        }
    }
}

/// Disqualifying check, carrying the figures needed to explain the shortfall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IneligibilityReason {
    LoanExceedsMaxAllowed { requested: f64, max_allowed: f64 },
    CreditScoreBelowMinimum { credit_score: u16, minimum: u16 },
    InsufficientCapital { capital: f64, required_down_payment: f64 },
}

impl IneligibilityReason {
    pub const fn label(&self) -> &'static str {
        match self {
            IneligibilityReason::LoanExceedsMaxAllowed { .. } => "loan exceeds max allowed",
            IneligibilityReason::CreditScoreBelowMinimum { .. } => "credit score below minimum",
            IneligibilityReason::InsufficientCapital { .. } => {
                "insufficient capital for down payment"
            }
        }
    }

    /// Distance to clearing the check, in currency or score points.
    pub fn shortfall(&self) -> f64 {
        match self {
            IneligibilityReason::LoanExceedsMaxAllowed {
                requested,
                max_allowed,
            } => requested - max_allowed,
            IneligibilityReason::CreditScoreBelowMinimum {
                credit_score,
                minimum,
            } => f64::from(*minimum) - f64::from(*credit_score),
            IneligibilityReason::InsufficientCapital {
                capital,
                required_down_payment,
            } => required_down_payment - capital,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::LoanExceedsMaxAllowed {
                requested,
                max_allowed,
            } => format!(
                "requested {:.2}, but the max allowed is {:.2}",
                requested, max_allowed
            ),
            IneligibilityReason::CreditScoreBelowMinimum {
                credit_score,
                minimum,
            } => format!("credit score {credit_score} is below the required {minimum}"),
            IneligibilityReason::InsufficientCapital {
                capital,
                required_down_payment,
            } => format!(
                "need at least {:.2} in capital for the down payment, but have {:.2}",
                required_down_payment, capital
            ),
        }
    }
}

/// Full verdict for one (profile, bank) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDecision {
    pub bank: BankConstraint,
    pub max_loan_allowed: f64,
    pub required_down_payment: f64,
    #[serde(flatten)]
    pub outcome: BankOutcome,
}

impl BankDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self.outcome, BankOutcome::Eligible { .. })
    }

    pub fn is_alternative_offer(&self) -> bool {
        matches!(self.outcome, BankOutcome::AlternativeOffer { .. })
    }

    pub fn loan_options(&self) -> &[LoanOption] {
        match &self.outcome {
            BankOutcome::Eligible { loan_options }
            | BankOutcome::AlternativeOffer { loan_options, .. } => loan_options,
            BankOutcome::Ineligible { .. } => &[],
        }
    }

    pub fn reasons(&self) -> &[IneligibilityReason] {
        match &self.outcome {
            BankOutcome::Eligible { .. } => &[],
            BankOutcome::AlternativeOffer { reasons, .. }
            | BankOutcome::Ineligible { reasons } => reasons,
        }
    }
}

pub(crate) fn decide_outcome(
    profile: &ApplicantProfile,
    bank: &BankConstraint,
    config: &EvaluationConfig,
    signals: ConstraintSignals,
) -> BankOutcome {
    let ConstraintSignals {
        max_loan_allowed,
        reasons,
        ..
    } = signals;

    if reasons.is_empty() {
        return BankOutcome::Eligible {
            loan_options: price_loan_options(profile.loan_amount, bank, profile, config),
        };
    }

    let credit_blocked = reasons
        .iter()
        .any(|reason| matches!(reason, IneligibilityReason::CreditScoreBelowMinimum { .. }));

    if config.offer_alternatives && !credit_blocked && max_loan_allowed > 0.0 {
        let max_down_payment = bank.down_payment_for(max_loan_allowed);
        if profile.capital >= max_down_payment {
            return BankOutcome::AlternativeOffer {
                offered_amount: max_loan_allowed,
                offered_down_payment: max_down_payment,
                loan_options: price_loan_options(max_loan_allowed, bank, profile, config),
                reasons,
            };
        }
    }

    BankOutcome::Ineligible { reasons }
}
