//! Deterministic gap prediction
//!
//! Applies the piecewise geometric law to the PNT baseline:
//! 1. target = round(Y), ties away from zero (`f64::round`, not numpy's
//!    ties-to-even; ln of an integer above 1 never lands on k + 0.5)
//! 2. high density: Psi_n = target + target * C_root * 1e-10
//!    low density:  Psi_n = target + C_add / 1000
//! 3. anti-tie guard: if Psi_n is within 1e-9 of an integer, add 1e-10
//! 4. gap = floor(Psi_n)
//!
//! CRITICAL: The arithmetic order above is part of the contract. Reordering
//! the products changes the last bits of Psi_n.

use crate::constants::{Calibration, EXACT_F64_INTEGER_LIMIT};
use crate::field::{calculate_prime_field_axes, FieldAxes, FieldType};
use crate::predict::error::{DomainViolation, PredictError, PredictResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// High density offset multiplier
const ROOT_OFFSET_SCALE: f64 = 0.000_000_000_1;

/// Low density offset divisor
const ADDITIVE_OFFSET_DIVISOR: f64 = 1000.0;

/// Distance to an integer below which the anti-tie guard fires
pub const ANTI_TIE_TOLERANCE: f64 = 1e-9;

/// Shift applied by the anti-tie guard
pub const ANTI_TIE_SHIFT: f64 = 1e-10;

/// 2^63: the first floor value that no longer fits an i64 gap
const GAP_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Whether the f64 arithmetic still represents `p_n` exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precision {
    /// |p_n| <= 2^53
    Exact,
    /// |p_n| > 2^53: p_n was rounded before the logarithm (advisory only)
    Degraded,
}

impl Precision {
    /// Classify `p_n` against the 2^53 exactness limit
    pub fn for_prime(p_n: i128) -> Self {
        if p_n.unsigned_abs() > EXACT_F64_INTEGER_LIMIT as u128 {
            Precision::Degraded
        } else {
            Precision::Exact
        }
    }

    /// True when the advisory applies
    pub fn is_degraded(self) -> bool {
        self == Precision::Degraded
    }
}

/// Outcome of a single prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// floor(psi_n)
    pub predicted_gap: i64,

    /// Deterministic state transition magnitude
    pub psi_n: f64,

    /// Field regime selected from the PNT baseline
    pub field_type: FieldType,

    /// Field coordinates the prediction was computed from
    pub axes: FieldAxes,

    /// Rounded PNT baseline the magnitude locks to
    pub target_integer: f64,

    /// Whether the anti-tie guard shifted psi_n
    pub anti_tie_applied: bool,

    /// Precision advisory for very large primes
    pub precision: Precision,
}

/// Magnitude before the anti-tie guard
pub fn lock_magnitude(field: FieldType, target_integer: f64, scaling: f64) -> f64 {
    match field {
        FieldType::HighDensity => target_integer + (target_integer * scaling * ROOT_OFFSET_SCALE),
        FieldType::LowDensity => target_integer + (scaling / ADDITIVE_OFFSET_DIVISOR),
    }
}

/// Shift `psi_n` off an integer boundary
///
/// Returns the (possibly shifted) magnitude and whether the guard fired.
pub fn apply_anti_tie_guard(psi_n: f64) -> (f64, bool) {
    if (psi_n - psi_n.round()).abs() < ANTI_TIE_TOLERANCE {
        (psi_n + ANTI_TIE_SHIFT, true)
    } else {
        (psi_n, false)
    }
}

/// Piecewise deterministic gap predictor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GapPredictor {
    calibration: Calibration,
}

impl GapPredictor {
    /// Create a predictor with a given calibration set
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    /// Calibration set this predictor applies
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Predict the gap following `p_n`
    ///
    /// `p_n_minus_1` is validated as non-negative but does not enter the
    /// formula. `n_index` only appears as the X axis.
    ///
    /// # Errors
    /// * `PredictError::Domain` if `p_n <= 1` or `p_n_minus_1 < 0`
    /// * `PredictError::NonFiniteMagnitude` if the calibration yields a non-finite Psi_n
    /// * `PredictError::GapOutOfRange` if floor(Psi_n) does not fit an i64
    pub fn predict(&self, p_n: i128, n_index: i64, p_n_minus_1: i128) -> PredictResult<Prediction> {
        if p_n_minus_1 < 0 {
            return Err(DomainViolation::NegativePreviousPrime(p_n_minus_1).into());
        }

        let axes = calculate_prime_field_axes(p_n, n_index)?;
        let pnt_gap = axes.y;

        let field_type = FieldType::classify(pnt_gap);
        let scaling = field_type.scaling_factor(&self.calibration);

        let target_integer = pnt_gap.round();
        let raw = lock_magnitude(field_type, target_integer, scaling);
        let (psi_n, anti_tie_applied) = apply_anti_tie_guard(raw);

        if !psi_n.is_finite() {
            return Err(PredictError::NonFiniteMagnitude(psi_n));
        }

        let gap = psi_n.floor();
        if !(-GAP_UPPER_BOUND..GAP_UPPER_BOUND).contains(&gap) {
            return Err(PredictError::GapOutOfRange(gap));
        }

        let precision = Precision::for_prime(p_n);
        if precision.is_degraded() {
            warn!(
                p_n = %p_n,
                "p_n exceeds 2^53; ln(p_n) is computed from a rounded value"
            );
        }

        debug!(
            p_n = %p_n,
            n_index,
            pnt_gap,
            field = ?field_type,
            psi_n,
            anti_tie_applied,
            "gap predicted"
        );

        Ok(Prediction {
            predicted_gap: gap as i64,
            psi_n,
            field_type,
            axes,
            target_integer,
            anti_tie_applied,
            precision,
        })
    }
}

/// Predict with the published calibration constants
pub fn predict_gap_deterministic(p_n: i128, n_index: i64, p_n_minus_1: i128) -> PredictResult<Prediction> {
    GapPredictor::default().predict(p_n, n_index, p_n_minus_1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::C_ROOT;

    #[test]
    fn test_scenario_509() {
        let p = predict_gap_deterministic(509, 97, 0).unwrap();
        assert_eq!(p.field_type, FieldType::HighDensity);
        assert_eq!(p.target_integer, 6.0);
        assert_eq!(p.predicted_gap, 6);
        // 6 + 6 * 0.844e-10, then shifted by the guard
        assert!(p.anti_tie_applied);
        assert!((p.psi_n - 6.000_000_000_606_4).abs() < 1e-13);
        assert_eq!(p.precision, Precision::Exact);
    }

    #[test]
    fn test_scenario_frontier() {
        let p = predict_gap_deterministic(100_000_000_000_000_003, 3_000_000_000_000_000, 0).unwrap();
        assert_eq!(p.field_type, FieldType::HighDensity);
        assert_eq!(p.target_integer, 39.0);
        assert_eq!(p.predicted_gap, 39);
        assert!(!p.anti_tie_applied);
        assert_eq!(p.psi_n, 39.0 + (39.0 * C_ROOT * 0.000_000_000_1));
        assert_eq!(p.precision, Precision::Degraded);
    }

    #[test]
    fn test_low_density_offset() {
        // ln(97) ~ 4.5747, rounds to 5
        let p = predict_gap_deterministic(97, 25, 89).unwrap();
        assert_eq!(p.field_type, FieldType::LowDensity);
        assert_eq!(p.target_integer, 5.0);
        assert!(!p.anti_tie_applied);
        assert_eq!(p.psi_n, 5.0 + 0.18 / 1000.0);
        assert_eq!(p.predicted_gap, 5);
    }

    #[test]
    fn test_boundary_primes_straddle_six() {
        // e^6 ~ 403.43
        let below = predict_gap_deterministic(401, 79, 397).unwrap();
        let above = predict_gap_deterministic(409, 80, 401).unwrap();
        assert_eq!(below.field_type, FieldType::LowDensity);
        assert_eq!(above.field_type, FieldType::HighDensity);
        assert_eq!(below.predicted_gap, 6);
        assert_eq!(above.predicted_gap, 6);
    }

    #[test]
    fn test_anti_tie_guard_shift_is_exact() {
        let raw = lock_magnitude(FieldType::HighDensity, 6.0, C_ROOT);
        let (shifted, fired) = apply_anti_tie_guard(raw);
        assert!(fired);
        assert_eq!(shifted, raw + ANTI_TIE_SHIFT);

        let (same, fired) = apply_anti_tie_guard(6.25);
        assert!(!fired);
        assert_eq!(same, 6.25);
    }

    #[test]
    fn test_guard_fires_on_exact_integer() {
        let (shifted, fired) = apply_anti_tie_guard(12.0);
        assert!(fired);
        assert_eq!(shifted.floor(), 12.0);
    }

    #[test]
    fn test_gap_is_floor_of_psi() {
        for p_n in [2i128, 3, 5, 7, 11, 13, 101, 509, 7919, 104_729] {
            let p = predict_gap_deterministic(p_n, 0, 0).unwrap();
            assert_eq!(p.predicted_gap as f64, p.psi_n.floor());
        }
    }

    #[test]
    fn test_idempotent() {
        let a = predict_gap_deterministic(7919, 1000, 7907).unwrap();
        let b = predict_gap_deterministic(7919, 1000, 7907).unwrap();
        assert_eq!(a.psi_n.to_bits(), b.psi_n.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_previous_prime_does_not_affect_result() {
        let a = predict_gap_deterministic(509, 97, 0).unwrap();
        let b = predict_gap_deterministic(509, 97, 503).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(
            predict_gap_deterministic(1, 0, 0).unwrap_err(),
            PredictError::Domain(DomainViolation::PrimeNotAboveOne(1))
        );
        assert!(predict_gap_deterministic(0, 0, 0).unwrap_err().is_domain());
        assert!(predict_gap_deterministic(-7, 0, 0).unwrap_err().is_domain());
        assert_eq!(
            predict_gap_deterministic(509, 97, -1).unwrap_err(),
            PredictError::Domain(DomainViolation::NegativePreviousPrime(-1))
        );
    }

    #[test]
    fn test_non_finite_calibration_is_rejected() {
        let predictor = GapPredictor::new(Calibration {
            root_scaling: f64::INFINITY,
            ..Calibration::default()
        });
        assert!(matches!(
            predictor.predict(509, 97, 0),
            Err(PredictError::NonFiniteMagnitude(_))
        ));
    }

    #[test]
    fn test_oversized_calibration_is_rejected() {
        let high = GapPredictor::new(Calibration {
            root_scaling: 1e300,
            ..Calibration::default()
        });
        assert!(matches!(
            high.predict(509, 97, 0),
            Err(PredictError::GapOutOfRange(g)) if g > 1e290
        ));

        let low = GapPredictor::new(Calibration {
            additive_factor: -1e300,
            ..Calibration::default()
        });
        assert!(matches!(
            low.predict(97, 25, 89),
            Err(PredictError::GapOutOfRange(g)) if g < -1e290
        ));
    }

    #[test]
    fn test_large_finite_calibration_keeps_floor_invariant() {
        // 6 + 6 * 1e12 * 1e-10 = 606, still representable
        let predictor = GapPredictor::new(Calibration {
            root_scaling: 1e12,
            ..Calibration::default()
        });
        let p = predictor.predict(509, 97, 0).unwrap();
        assert_eq!(p.predicted_gap as f64, p.psi_n.floor());
        assert_eq!(p.predicted_gap, 606);
    }

    #[test]
    fn test_precision_boundary() {
        assert_eq!(Precision::for_prime(EXACT_F64_INTEGER_LIMIT), Precision::Exact);
        assert_eq!(Precision::for_prime(EXACT_F64_INTEGER_LIMIT + 1), Precision::Degraded);
    }
}
