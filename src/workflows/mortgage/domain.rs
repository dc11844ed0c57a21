use serde::{Deserialize, Serialize};

/// Lowest credit score accepted at intake.
pub const MIN_CREDIT_SCORE: u16 = 300;
/// Highest credit score accepted at intake.
pub const MAX_CREDIT_SCORE: u16 = 850;

/// Lending constraints published by a single bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConstraint {
    pub name: String,
    /// Annual rate as a plain percentage (6.1 means 6.1%).
    pub base_interest_rate: f64,
    pub max_loan_to_income: f64,
    pub min_credit_score: u16,
    /// Share of the loan the applicant must cover from capital, in `[0, 1]`.
    pub down_payment_fraction: f64,
}

impl BankConstraint {
    pub fn new(
        name: impl Into<String>,
        base_interest_rate: f64,
        max_loan_to_income: f64,
        min_credit_score: u16,
        down_payment_fraction: f64,
    ) -> Self {
        Self {
            name: name.into(),
            base_interest_rate,
            max_loan_to_income,
            min_credit_score,
            down_payment_fraction,
        }
    }

    pub fn max_loan_allowed(&self, annual_income: f64) -> f64 {
        self.max_loan_to_income * annual_income
    }

    pub fn down_payment_for(&self, loan_amount: f64) -> f64 {
        self.down_payment_fraction * loan_amount
    }
}

/// Borrower figures supplied for one eligibility request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub loan_amount: f64,
    pub annual_income: f64,
    pub capital: f64,
    pub credit_score: u16,
}

impl ApplicantProfile {
    pub fn monthly_income(&self) -> f64 {
        self.annual_income / 12.0
    }

    /// Rejects profiles the evaluator must never see.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.loan_amount.is_finite() || self.loan_amount <= 0.0 {
            return Err(ValidationError::LoanAmount(self.loan_amount));
        }
        if !self.annual_income.is_finite() || self.annual_income <= 0.0 {
            return Err(ValidationError::AnnualIncome(self.annual_income));
        }
        if !self.capital.is_finite() || self.capital < 0.0 {
            return Err(ValidationError::Capital(self.capital));
        }
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&self.credit_score) {
            return Err(ValidationError::CreditScore(self.credit_score));
        }
        Ok(())
    }
}

/// Caller input errors raised before any bank is evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("loan amount must be greater than 0 (found {0})")]
    LoanAmount(f64),
    #[error("annual income must be greater than 0 (found {0})")]
    AnnualIncome(f64),
    #[error("capital cannot be negative (found {0})")]
    Capital(f64),
    #[error("credit score must be between 300 and 850 (found {0})")]
    CreditScore(u16),
}

/// Repayment horizons quoted for every approved loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoanTerm {
    FifteenYears,
    TwentyFiveYears,
    ThirtyYears,
}

impl LoanTerm {
    pub const ALL: [LoanTerm; 3] = [
        LoanTerm::FifteenYears,
        LoanTerm::TwentyFiveYears,
        LoanTerm::ThirtyYears,
    ];

    pub const fn years(self) -> u32 {
        match self {
            LoanTerm::FifteenYears => 15,
            LoanTerm::TwentyFiveYears => 25,
            LoanTerm::ThirtyYears => 30,
        }
    }

    pub const fn months(self) -> u32 {
        self.years() * 12
    }
}

/// Monthly installment quoted for one repayment term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanOption {
    pub term_years: u32,
    pub monthly_payment: f64,
    pub sustainable: bool,
}
