use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::mortgage::catalog::ConstraintCatalog;
use crate::workflows::mortgage::domain::{ApplicantProfile, BankConstraint};
use crate::workflows::mortgage::evaluation::EvaluationConfig;
use crate::workflows::mortgage::history::{HistoryEntry, HistoryError, HistoryRecorder};
use crate::workflows::mortgage::service::MortgageAdvisorService;

/// The worked scenario: too much borrowing for a strict bank, fine for a lenient one.
pub(super) fn scenario_profile() -> ApplicantProfile {
    ApplicantProfile {
        loan_amount: 400_000.0,
        annual_income: 90_000.0,
        capital: 50_000.0,
        credit_score: 680,
    }
}

pub(super) fn strict_bank() -> BankConstraint {
    BankConstraint::new("Strict Savings", 6.1, 4.0, 720, 0.10)
}

pub(super) fn lenient_bank() -> BankConstraint {
    BankConstraint::new("Lenient Mutual", 5.5, 5.0, 650, 0.10)
}

pub(super) fn scenario_catalog() -> ConstraintCatalog {
    ConstraintCatalog::from_banks([strict_bank(), lenient_bank()])
}

pub(super) fn build_service(
    config: EvaluationConfig,
) -> (MortgageAdvisorService<MemoryHistory>, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::default());
    let service = MortgageAdvisorService::new(scenario_catalog(), history.clone(), config);
    (service, history)
}

#[derive(Default)]
pub(super) struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub(super) fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().expect("history mutex poisoned").clone()
    }
}

impl HistoryRecorder for MemoryHistory {
    fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        self.entries
            .lock()
            .expect("history mutex poisoned")
            .push(entry.clone());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.entries();
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.into_iter().skip(skip).collect())
    }
}

pub(super) struct UnavailableHistory;

impl HistoryRecorder for UnavailableHistory {
    fn append(&self, _entry: &HistoryEntry) -> Result<(), HistoryError> {
        Err(HistoryError::Unavailable("disk full".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        Err(HistoryError::Unavailable("disk full".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("json body")
}
