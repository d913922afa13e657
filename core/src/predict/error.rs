//! Prediction errors

use thiserror::Error;

/// Errors that can occur while computing a gap prediction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Input outside the domain of the formula (the logarithm or the Z division)
    #[error("domain error: {0}")]
    Domain(DomainViolation),

    /// Psi_n left the finite range (only reachable with a non-finite calibration)
    #[error("non-finite magnitude Psi_n = {0}")]
    NonFiniteMagnitude(f64),

    /// floor(Psi_n) does not fit the integer gap type
    #[error("floor(Psi_n) = {0} is outside the i64 gap range")]
    GapOutOfRange(f64),
}

/// The specific domain rule an input broke
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainViolation {
    #[error("p_n = {0} must be greater than 1 (ln(p_n) must be positive)")]
    PrimeNotAboveOne(i128),

    #[error("PNT baseline ln(p_n) = {0} is not a positive finite value")]
    DegenerateBaseline(f64),

    #[error("p_n_minus_1 = {0} must be non-negative")]
    NegativePreviousPrime(i128),
}

impl From<DomainViolation> for PredictError {
    fn from(v: DomainViolation) -> Self {
        PredictError::Domain(v)
    }
}

impl PredictError {
    /// True for any domain violation
    pub fn is_domain(&self) -> bool {
        matches!(self, PredictError::Domain(_))
    }
}

/// Result type for prediction operations
pub type PredictResult<T> = Result<T, PredictError>;
