use super::super::domain::{ApplicantProfile, BankConstraint, LoanOption, LoanTerm};
use super::amortization::{calculate_monthly_payment, is_sustainable};
use super::config::EvaluationConfig;
use super::policy::IneligibilityReason;

pub(crate) struct ConstraintSignals {
    pub max_loan_allowed: f64,
    pub required_down_payment: f64,
    pub reasons: Vec<IneligibilityReason>,
}

/// Runs every bank check against the requested amount; failures accumulate.
pub(crate) fn check_constraints(
    profile: &ApplicantProfile,
    bank: &BankConstraint,
) -> ConstraintSignals {
    let max_loan_allowed = bank.max_loan_allowed(profile.annual_income);
    let required_down_payment = bank.down_payment_for(profile.loan_amount);
    let mut reasons = Vec::new();

    if profile.loan_amount > max_loan_allowed {
        reasons.push(IneligibilityReason::LoanExceedsMaxAllowed {
            requested: profile.loan_amount,
            max_allowed: max_loan_allowed,
        });
    }

    if profile.credit_score < bank.min_credit_score {
        reasons.push(IneligibilityReason::CreditScoreBelowMinimum {
            credit_score: profile.credit_score,
            minimum: bank.min_credit_score,
        });
    }

    if profile.capital < required_down_payment {
        reasons.push(IneligibilityReason::InsufficientCapital {
            capital: profile.capital,
            required_down_payment,
        });
    }

    ConstraintSignals {
        max_loan_allowed,
        required_down_payment,
        reasons,
    }
}

pub(crate) fn price_loan_options(
    principal: f64,
    bank: &BankConstraint,
    profile: &ApplicantProfile,
    config: &EvaluationConfig,
) -> Vec<LoanOption> {
    LoanTerm::ALL
        .iter()
        .map(|term| {
            let monthly_payment =
                calculate_monthly_payment(principal, bank.base_interest_rate, term.years());
            LoanOption {
                term_years: term.years(),
                monthly_payment,
                sustainable: is_sustainable(
                    monthly_payment,
                    profile.monthly_income(),
                    config.sustainability_ratio,
                ),
            }
        })
        .collect()
}
