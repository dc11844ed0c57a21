use serde::{Deserialize, Serialize};

/// Share of monthly income a payment must stay under to count as sustainable.
pub const DEFAULT_SUSTAINABILITY_RATIO: f64 = 0.3;

/// Dials applied uniformly to every bank during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub sustainability_ratio: f64,
    /// Price rejected requests against the bank's maximum allowed loan when capital covers it.
    pub offer_alternatives: bool,
}

impl EvaluationConfig {
    pub fn with_alternatives(mut self, enabled: bool) -> Self {
        self.offer_alternatives = enabled;
        self
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            sustainability_ratio: DEFAULT_SUSTAINABILITY_RATIO,
            offer_alternatives: false,
        }
    }
}
