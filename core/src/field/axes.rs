//! Prime field coordinate axes (X, Y, Z)
//!
//! Maps a prime and its index to a position on the prime field:
//! - X: linear prime index (pass-through)
//! - Y: logarithmic constraint axis, ln(p_n), the PNT baseline gap
//! - Z: integral correction axis, p_n / ln(p_n), a simplified Li(p_n) proxy

use crate::predict::error::{DomainViolation, PredictResult};
use serde::{Deserialize, Serialize};

/// Position on the prime field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldAxes {
    /// Linear prime index
    pub x: i64,

    /// PNT baseline gap, ln(p_n)
    pub y: f64,

    /// Integral correction proxy, p_n / y
    pub z: f64,
}

impl FieldAxes {
    /// PNT baseline gap (alias for the Y axis)
    #[inline]
    pub fn pnt_baseline(&self) -> f64 {
        self.y
    }
}

/// Compute the field axes for `p_n` at position `n_index`
///
/// `n_index` is not range-checked. Fails with a domain error when `p_n <= 1`,
/// since ln(p_n) must be positive for the Z division.
pub fn calculate_prime_field_axes(p_n: i128, n_index: i64) -> PredictResult<FieldAxes> {
    if p_n <= 1 {
        return Err(DomainViolation::PrimeNotAboveOne(p_n).into());
    }

    let p = p_n as f64;
    let y = p.ln();
    if !(y.is_finite() && y > 0.0) {
        return Err(DomainViolation::DegenerateBaseline(y).into());
    }

    Ok(FieldAxes {
        x: n_index,
        y,
        z: p / y,
    })
}
