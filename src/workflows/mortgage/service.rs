use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::ConstraintCatalog;
use super::domain::ApplicantProfile;
use super::evaluation::{EligibilityEvaluator, EvaluationConfig, EvaluationError};
use super::history::{HistoryEntry, HistoryError, HistoryRecorder};
use super::report::EligibilityReport;

/// Intake payload: the profile plus an optional per-request alternative-offer toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(flatten)]
    pub profile: ApplicantProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_alternatives: Option<bool>,
}

impl From<ApplicantProfile> for AssessmentRequest {
    fn from(profile: ApplicantProfile) -> Self {
        Self {
            profile,
            offer_alternatives: None,
        }
    }
}

/// Service composing the constraint catalog, evaluator, and request history.
pub struct MortgageAdvisorService<H> {
    catalog: Arc<ConstraintCatalog>,
    evaluator: Arc<EligibilityEvaluator>,
    history: Arc<H>,
}

impl<H> MortgageAdvisorService<H>
where
    H: HistoryRecorder + 'static,
{
    pub fn new(catalog: ConstraintCatalog, history: Arc<H>, config: EvaluationConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            evaluator: Arc::new(EligibilityEvaluator::new(config)),
            history,
        }
    }

    pub fn catalog(&self) -> &ConstraintCatalog {
        &self.catalog
    }

    /// Evaluate a request and append the accepted profile to the history log.
    pub fn assess(
        &self,
        request: AssessmentRequest,
    ) -> Result<EligibilityReport, AdvisorServiceError> {
        let report = self.preview(request)?;
        self.history
            .append(&HistoryEntry::new(&report.profile, Utc::now()))?;

        info!(
            eligible = report.eligible_count,
            alternatives = report.alternative_count,
            ineligible = report.ineligible_count,
            "mortgage eligibility assessed"
        );
        Ok(report)
    }

    /// Evaluate without recording anything.
    pub fn preview(
        &self,
        request: AssessmentRequest,
    ) -> Result<EligibilityReport, AdvisorServiceError> {
        let AssessmentRequest {
            profile,
            offer_alternatives,
        } = request;

        let decisions = match offer_alternatives {
            Some(enabled) if enabled != self.evaluator.config().offer_alternatives => {
                let config = self.evaluator.config().clone().with_alternatives(enabled);
                EligibilityEvaluator::new(config).evaluate(&profile, &self.catalog)?
            }
            _ => self.evaluator.evaluate(&profile, &self.catalog)?,
        };

        Ok(EligibilityReport::new(profile, decisions))
    }

    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>, AdvisorServiceError> {
        Ok(self.history.recent(limit)?)
    }
}

/// Error raised by the advisor service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorServiceError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    History(#[from] HistoryError),
}
