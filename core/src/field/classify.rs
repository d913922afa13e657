//! Field classification (piecewise law selector)

use crate::constants::Calibration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometric field regime of a prime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
    /// Entropy field: PNT baseline above 6.0, scaled by C_root
    HighDensity,
    /// Sieve field: PNT baseline at or below 6.0, offset by C_add
    LowDensity,
}

impl FieldType {
    /// Classify from the PNT baseline `y`
    ///
    /// The boundary is the literal 6.0 with a strict comparison, so `y == 6.0`
    /// is low density. It is NOT the calibration's separation threshold.
    pub fn classify(y: f64) -> Self {
        if y > 6.0 {
            FieldType::HighDensity
        } else {
            FieldType::LowDensity
        }
    }

    /// Scaling factor this field takes from a calibration set
    pub fn scaling_factor(self, calibration: &Calibration) -> f64 {
        match self {
            FieldType::HighDensity => calibration.root_scaling,
            FieldType::LowDensity => calibration.additive_factor,
        }
    }

    /// Human-readable label used by reports
    pub fn label(self) -> &'static str {
        match self {
            FieldType::HighDensity => "High Density (Entropy)",
            FieldType::LowDensity => "Low Density (Sieve)",
        }
    }

    /// Every field regime, high density first
    pub fn all() -> [FieldType; 2] {
        [FieldType::HighDensity, FieldType::LowDensity]
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{C_ADD, C_ROOT, T_OMEGA};

    #[test]
    fn test_boundary_is_low_density() {
        assert_eq!(FieldType::classify(6.0), FieldType::LowDensity);
        assert_eq!(FieldType::classify(6.0 + f64::EPSILON * 8.0), FieldType::HighDensity);
        assert_eq!(FieldType::classify(5.999), FieldType::LowDensity);
    }

    #[test]
    fn test_separation_threshold_is_not_the_boundary() {
        // Values just above T_OMEGA are still well inside the sieve field
        assert_eq!(FieldType::classify(T_OMEGA * 2.0), FieldType::LowDensity);
        assert_eq!(FieldType::classify(1.0), FieldType::LowDensity);
    }

    #[test]
    fn test_scaling_factor_per_field() {
        let cal = Calibration::default();
        assert_eq!(FieldType::HighDensity.scaling_factor(&cal), C_ROOT);
        assert_eq!(FieldType::LowDensity.scaling_factor(&cal), C_ADD);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FieldType::HighDensity.to_string(), "High Density (Entropy)");
        assert_eq!(FieldType::LowDensity.to_string(), "Low Density (Sieve)");
    }
}
