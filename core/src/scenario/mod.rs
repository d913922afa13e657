//! Observed-gap scenarios
//!
//! A scenario pairs a prime with the gap actually observed after it, so the
//! predictor's output can be checked for a deterministic lock.

pub mod report;

pub use report::{evaluate, FieldTally, LockOutcome, LockReport};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading scenarios
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for scenario loading
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// A prime with its index and the observed gap that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Short description
    #[serde(default)]
    pub label: String,

    /// Prime value
    pub p_n: i128,

    /// Index of p_n in the prime sequence
    pub n_index: i64,

    /// Previous prime (not used by the formula)
    #[serde(default)]
    pub p_n_minus_1: i128,

    /// Gap observed after p_n
    pub observed_gap: i64,
}

/// On-disk scenario file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub scenarios: Vec<Scenario>,
}

impl Scenario {
    pub fn new(label: impl Into<String>, p_n: i128, n_index: i64, observed_gap: i64) -> Self {
        Self {
            label: label.into(),
            p_n,
            n_index,
            p_n_minus_1: 0,
            observed_gap,
        }
    }

    /// The two calibration scenarios of the demonstration run
    ///
    /// The frontier index is a placeholder and its observed gap is
    /// hypothetical.
    pub fn demo_scenarios() -> Vec<Scenario> {
        vec![
            Scenario::new("High density (LGO kit)", 509, 97, 18),
            Scenario::new(
                "Frontier scale (hypothetical)",
                100_000_000_000_000_003,
                3_000_000_000_000_000,
                40,
            ),
        ]
    }
}

/// Parse scenarios from a JSON string
///
/// Accepts either `{"scenarios": [...]}` or a bare array.
pub fn parse_scenarios(json: &str) -> ScenarioResult<Vec<Scenario>> {
    if json.trim_start().starts_with('[') {
        Ok(serde_json::from_str(json)?)
    } else {
        let set: ScenarioSet = serde_json::from_str(json)?;
        Ok(set.scenarios)
    }
}

/// Load scenarios from a JSON file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> ScenarioResult<Vec<Scenario>> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_scenarios(&contents)
}
