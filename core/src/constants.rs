//! Calibration constants for the prime field
//!
//! CRITICAL: These values define the geometric law. The predictor's locked
//! scenarios depend on them bit-for-bit. DO NOT modify without re-running the
//! scenario fixtures.

use serde::{Deserialize, Serialize};

/// Field separation threshold (T_Omega)
///
/// Declared as part of the calibration set but NOT consulted by the field
/// branch, which compares the PNT baseline against a fixed 6.0.
pub const T_OMEGA: f64 = 0.0025;

/// Entropy field root scaling constant (C_root)
pub const C_ROOT: f64 = 0.844;

/// Sieve field additive factor (C_add)
pub const C_ADD: f64 = 0.18;

/// Largest magnitude at which every integer is exactly representable as f64 (2^53)
pub const EXACT_F64_INTEGER_LIMIT: i128 = 1 << 53;

/// Calibration set used by a [`crate::GapPredictor`]
///
/// `Default` yields the published constants. Alternate sets are for
/// experimentation only; the field boundary itself is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Field separation threshold (carried, unused by the branch)
    #[serde(default = "default_separation_threshold")]
    pub separation_threshold: f64,

    /// Scaling applied in the high density field
    #[serde(default = "default_root_scaling")]
    pub root_scaling: f64,

    /// Offset applied in the low density field
    #[serde(default = "default_additive_factor")]
    pub additive_factor: f64,
}

fn default_separation_threshold() -> f64 {
    T_OMEGA
}

fn default_root_scaling() -> f64 {
    C_ROOT
}

fn default_additive_factor() -> f64 {
    C_ADD
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            separation_threshold: T_OMEGA,
            root_scaling: C_ROOT,
            additive_factor: C_ADD,
        }
    }
}

impl Calibration {
    /// Parse a calibration set from JSON; missing fields fall back to the constants
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// True when every value is finite
    pub fn is_finite(&self) -> bool {
        self.separation_threshold.is_finite()
            && self.root_scaling.is_finite()
            && self.additive_factor.is_finite()
    }
}
