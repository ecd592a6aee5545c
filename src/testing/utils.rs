use crate::error::{DomainError, NumericalWarning};
use crate::testing::TestResult;
use anyhow::bail;
use single_utilities::traits::FloatOps;
use tracing::{debug, warn};

/// Statistics beyond this magnitude are flagged as numerically suspicious.
pub const LARGE_STATISTIC: f64 = 1e6;

/// Standard deviations below this fraction of |mean| are flagged.
pub const NEAR_ZERO_RELATIVE_SD: f64 = 1e-8;

/// Sorted distinct labels of a categorical sample.
pub fn extract_unique_labels<L>(labels: &[L]) -> Vec<L>
where
    L: Ord + Clone,
{
    let mut unique_labels = labels.to_vec();
    unique_labels.sort();
    unique_labels.dedup();
    unique_labels
}

/// Convert a numeric sample to `f64`, rejecting NaN and infinities.
pub fn to_f64_sample<T>(sample: &[T], name: &str) -> anyhow::Result<Vec<f64>>
where
    T: FloatOps,
{
    let mut values = Vec::with_capacity(sample.len());
    for &value in sample {
        match value.to_f64() {
            Some(v) if v.is_finite() => values.push(v),
            _ => bail!(DomainError::NonFinite(name.to_string())),
        }
    }
    Ok(values)
}

pub fn require_len(actual: usize, expected: usize) -> anyhow::Result<()> {
    if actual < expected {
        bail!(DomainError::InsufficientData { expected, actual });
    }
    Ok(())
}

pub fn require_same_len(left: usize, right: usize) -> anyhow::Result<()> {
    if left != right {
        bail!(DomainError::length_mismatch(left, right));
    }
    Ok(())
}

pub fn validate_confidence(confidence: f64) -> anyhow::Result<()> {
    if !(confidence > 0.0 && confidence < 1.0) {
        bail!(DomainError::invalid_confidence(confidence));
    }
    Ok(())
}

/// Size, mean and unbiased variance of a numeric sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    /// Unbiased sample variance `Σ(x - mean)² / (n - 1)`
    pub variance: f64,
}

impl SampleSummary {
    /// Two-pass summary; requires at least two observations.
    pub fn from_values(values: &[f64]) -> anyhow::Result<Self> {
        require_len(values.len(), 2)?;

        let n = values.len();
        let n_f = n as f64;
        let mean = values.iter().sum::<f64>() / n_f;
        let sum_sq_dev: f64 = values.iter().map(|&x| (x - mean).powi(2)).sum();
        let variance = sum_sq_dev / (n_f - 1.0);

        // Finite values can still overflow the sums
        if !mean.is_finite() || !variance.is_finite() {
            bail!(DomainError::NonFinite("sample summary".to_string()));
        }

        Ok(SampleSummary { n, mean, variance })
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Standard error of the mean `sqrt(s² / n)`.
    pub fn standard_error(&self) -> f64 {
        (self.variance / self.n as f64).sqrt()
    }

    pub fn degrees_of_freedom(&self) -> f64 {
        (self.n - 1) as f64
    }

    /// Fail unless the variance is strictly positive.
    pub fn require_variance(&self, context: &str) -> anyhow::Result<()> {
        if !self.variance.is_finite() {
            bail!(DomainError::NonFinite(context.to_string()));
        }
        if !(self.variance > 0.0) {
            bail!(DomainError::ZeroVariance(context.to_string()));
        }
        Ok(())
    }

    pub fn variance_warning(&self) -> Option<NumericalWarning> {
        let negligible = self.variance > 0.0
            && self.std_dev() <= NEAR_ZERO_RELATIVE_SD * self.mean.abs();
        negligible.then_some(NumericalWarning::NearZeroVariance {
            variance: self.variance,
        })
    }
}

/// Attach statistic-level warnings and trace the finished result.
pub fn finish_test(test_name: &str, mut result: TestResult<f64>) -> TestResult<f64> {
    if result.statistic.abs() > LARGE_STATISTIC {
        result.warnings.push(NumericalWarning::LargeStatistic {
            statistic: result.statistic,
        });
    }
    if result.p_value == 0.0 {
        result.warnings.push(NumericalWarning::PValueUnderflow);
    }

    for warning in &result.warnings {
        warn!(test = test_name, %warning, "numerical warning");
    }
    debug!(
        test = test_name,
        statistic = result.statistic,
        p_value = result.p_value,
        "test finished"
    );
    result
}
