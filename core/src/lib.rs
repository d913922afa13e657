//! Prime Gap Core
//!
//! Deterministic prime gap prediction on the LGO prime field: a prime and its
//! index are mapped to field axes, the PNT baseline selects a field regime,
//! and a piecewise law locks the magnitude Psi_n whose floor is the gap.

pub mod constants; // Calibration constants
pub mod field;     // Axes and field classification
pub mod predict;   // Piecewise gap predictor
pub mod scenario;  // Observed-gap scenarios and lock reports

pub use constants::{Calibration, C_ADD, C_ROOT, T_OMEGA};
pub use field::{calculate_prime_field_axes, FieldAxes, FieldType};
pub use predict::{
    predict_gap_deterministic, DomainViolation, GapPredictor, Precision, PredictError,
    PredictResult, Prediction,
};
pub use scenario::{evaluate, load_scenarios, LockOutcome, LockReport, Scenario, ScenarioError};
