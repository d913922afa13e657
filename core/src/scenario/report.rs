//! Deterministic lock evaluation
//!
//! Runs the predictor over a scenario set and tallies locks (predicted gap
//! equal to the observed gap) per field regime.

use super::Scenario;
use crate::field::FieldType;
use crate::predict::{GapPredictor, Prediction};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of running one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockOutcome {
    pub scenario: Scenario,

    /// Present when the prediction succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,

    /// Present when the predictor rejected the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// predicted_gap == observed_gap
    pub locked: bool,
}

impl LockOutcome {
    /// Run a single scenario; predictor errors become a failed outcome
    pub fn run(predictor: &GapPredictor, scenario: &Scenario) -> Self {
        match predictor.predict(scenario.p_n, scenario.n_index, scenario.p_n_minus_1) {
            Ok(prediction) => LockOutcome {
                scenario: scenario.clone(),
                locked: prediction.predicted_gap == scenario.observed_gap,
                prediction: Some(prediction),
                error: None,
            },
            Err(e) => LockOutcome {
                scenario: scenario.clone(),
                prediction: None,
                error: Some(e.to_string()),
                locked: false,
            },
        }
    }

    /// Signed miss: predicted - observed
    pub fn residual(&self) -> Option<i64> {
        self.prediction
            .as_ref()
            .map(|p| p.predicted_gap - self.scenario.observed_gap)
    }
}

/// Lock counts for one field regime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTally {
    pub locked: usize,
    pub missed: usize,
}

impl FieldTally {
    pub fn total(&self) -> usize {
        self.locked + self.missed
    }
}

/// Aggregate lock report for a scenario set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockReport {
    pub outcomes: Vec<LockOutcome>,

    /// Per-field lock counts (rejected scenarios are not counted here)
    pub by_field: FxHashMap<FieldType, FieldTally>,

    /// Scenarios the predictor rejected
    pub rejected: usize,
}

impl LockReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn locked(&self) -> usize {
        self.outcomes.iter().filter(|o| o.locked).count()
    }

    /// Fraction of scenarios that locked (0.0 for an empty report)
    pub fn lock_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.locked() as f64 / self.total() as f64
    }

    pub fn tally(&self, field: FieldType) -> FieldTally {
        self.by_field.get(&field).copied().unwrap_or_default()
    }

    /// Mean absolute residual over successful predictions
    pub fn mean_abs_residual(&self) -> Option<f64> {
        let residuals: Vec<i64> = self.outcomes.iter().filter_map(|o| o.residual()).collect();
        if residuals.is_empty() {
            return None;
        }
        let sum: i64 = residuals.iter().map(|r| r.abs()).sum();
        Some(sum as f64 / residuals.len() as f64)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Evaluate every scenario against the predictor
pub fn evaluate(predictor: &GapPredictor, scenarios: &[Scenario]) -> LockReport {
    let mut report = LockReport::default();

    for scenario in scenarios {
        let outcome = LockOutcome::run(predictor, scenario);

        match &outcome.prediction {
            Some(p) => {
                let tally = report.by_field.entry(p.field_type).or_default();
                if outcome.locked {
                    tally.locked += 1;
                } else {
                    tally.missed += 1;
                }
            }
            None => {
                debug!(p_n = %scenario.p_n, error = ?outcome.error, "scenario rejected");
                report.rejected += 1;
            }
        }

        report.outcomes.push(outcome);
    }

    info!(
        total = report.total(),
        locked = report.locked(),
        rejected = report.rejected,
        "lock evaluation complete"
    );

    report
}
