//! Error and warning types shared by every test in the crate.
//!
//! Fallible functions return `anyhow::Result`; invalid or degenerate input is
//! raised as a [`DomainError`] so callers can recover the typed cause with
//! `err.downcast_ref::<DomainError>()`.

use thiserror::Error;

/// Invalid or degenerate statistical input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Count pair outside `trials > 0`, `successes <= trials`
    #[error("Invalid counts: {successes} successes out of {trials} trials")]
    InvalidCounts { successes: usize, trials: usize },

    /// Parameter outside its admissible range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Not enough observations for the requested statistic
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Two samples that must be aligned have different lengths
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Input contains NaN, infinite, or unrepresentable values
    #[error("{0} contains NaN or infinite values")]
    NonFinite(String),

    /// Variance is exactly zero where it divides the statistic
    #[error("Zero variance in {0}")]
    ZeroVariance(String),

    /// Standard error collapsed to zero
    #[error("Zero standard error in {0}")]
    ZeroStandardError(String),

    /// Chi-square expected frequency of zero
    #[error("Zero expected count in contingency cell ({row}, {col})")]
    ZeroExpectedCount { row: usize, col: usize },

    /// Contingency table without at least two rows and two columns
    #[error("Degenerate contingency table: {rows} rows x {cols} columns")]
    DegenerateTable { rows: usize, cols: usize },
}

impl DomainError {
    pub fn invalid_confidence(confidence: f64) -> Self {
        Self::InvalidParameter(format!("confidence level {confidence} must be in (0, 1)"))
    }

    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::LengthMismatch { left, right }
    }
}

/// Result is valid but numerically borderline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericalWarning {
    #[error("variance {variance:e} is negligible relative to the mean")]
    NearZeroVariance { variance: f64 },

    #[error("test statistic {statistic:e} is extremely large")]
    LargeStatistic { statistic: f64 },

    #[error("p-value underflowed to zero")]
    PValueUnderflow,

    #[error("smallest expected count {min_expected} is below 5")]
    SmallExpectedCount { min_expected: f64 },

    #[error("standard error is zero, interval collapses to the estimate")]
    DegenerateInterval,

    #[error("interval ({lower}, {upper}) extends outside [0, 1]")]
    IntervalOutsideUnitRange { lower: f64, upper: f64 },
}
