//! Gap prediction from the prime field coordinates

pub mod error;
pub mod gap;

pub use error::{DomainViolation, PredictError, PredictResult};
pub use gap::{
    apply_anti_tie_guard, lock_magnitude, predict_gap_deterministic, GapPredictor, Precision,
    Prediction, ANTI_TIE_SHIFT, ANTI_TIE_TOLERANCE,
};
