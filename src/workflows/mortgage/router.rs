use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::domain::BankConstraint;
use super::history::HistoryRecorder;
use super::report::EligibilityReport;
use super::service::{AssessmentRequest, MortgageAdvisorService};
use crate::error::AppError;

/// Router builder exposing the eligibility endpoints.
pub fn advisor_router<H>(service: Arc<MortgageAdvisorService<H>>) -> Router
where
    H: HistoryRecorder + 'static,
{
    Router::new()
        .route("/api/v1/mortgage/eligibility", post(eligibility_handler::<H>))
        .route("/api/v1/mortgage/banks", get(banks_handler::<H>))
        .with_state(service)
}

pub(crate) async fn eligibility_handler<H>(
    State(service): State<Arc<MortgageAdvisorService<H>>>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<EligibilityReport>, AppError>
where
    H: HistoryRecorder + 'static,
{
    let report = service.assess(request)?;
    Ok(Json(report))
}

pub(crate) async fn banks_handler<H>(
    State(service): State<Arc<MortgageAdvisorService<H>>>,
) -> Json<Vec<BankConstraint>>
where
    H: HistoryRecorder + 'static,
{
    Json(service.catalog().banks().to_vec())
}
