//! Mortgage eligibility: bank constraint catalog, per-bank evaluation, and request history.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod history;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, ConstraintCatalog, CsvCatalogStore};
pub use domain::{ApplicantProfile, BankConstraint, LoanOption, LoanTerm, ValidationError};
pub use evaluation::{
    calculate_monthly_payment, evaluate, BankDecision, BankOutcome, EligibilityEvaluator,
    EvaluationConfig, EvaluationError, IneligibilityReason,
};
pub use history::{CsvHistoryLog, HistoryEntry, HistoryError, HistoryRecorder};
pub use report::EligibilityReport;
pub use router::advisor_router;
pub use service::{AdvisorServiceError, AssessmentRequest, MortgageAdvisorService};
