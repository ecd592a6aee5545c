//! Normal-approximation statistics for proportions.
//!
//! All routines work on summary counts: `successes` out of `trials`.

use crate::error::{DomainError, NumericalWarning};
use crate::testing::distributions::{normal_p_value, normal_quantile};
use crate::testing::utils::{finish_test, validate_confidence};
use crate::testing::{ConfidenceInterval, TestResult};
use anyhow::bail;
use tracing::{debug, warn};

fn validate_counts(successes: usize, trials: usize) -> anyhow::Result<()> {
    if trials == 0 || successes > trials {
        bail!(DomainError::InvalidCounts { successes, trials });
    }
    Ok(())
}

#[inline]
fn proportion_and_standard_error(successes: usize, trials: usize) -> (f64, f64) {
    let n = trials as f64;
    let p_hat = successes as f64 / n;
    (p_hat, (p_hat * (1.0 - p_hat) / n).sqrt())
}

/// Wald confidence interval for a single proportion.
///
/// `p̂ ± z·sqrt(p̂(1-p̂)/n)` with `z = Φ⁻¹(1 - (1 - confidence)/2)`. When `p̂`
/// is 0 or 1 the interval collapses to the estimate and carries a
/// [`NumericalWarning::DegenerateInterval`].
///
/// # Arguments
///
/// * `successes` - Number of successes
/// * `trials` - Number of trials, must be positive
/// * `confidence` - Confidence level in `(0, 1)`
pub fn proportion_confidence_interval(
    successes: usize,
    trials: usize,
    confidence: f64,
) -> anyhow::Result<ConfidenceInterval> {
    validate_counts(successes, trials)?;
    validate_confidence(confidence)?;

    let (p_hat, standard_error) = proportion_and_standard_error(successes, trials);
    let alpha = 1.0 - confidence;
    let z_critical = normal_quantile(1.0 - alpha / 2.0)?;

    let mut interval = ConfidenceInterval::symmetric(p_hat, standard_error, z_critical, confidence);
    if standard_error == 0.0 {
        interval = interval.with_warning(NumericalWarning::DegenerateInterval);
    }
    if interval.lower < 0.0 || interval.upper > 1.0 {
        let (lower, upper) = interval.as_tuple();
        interval = interval.with_warning(NumericalWarning::IntervalOutsideUnitRange { lower, upper });
    }

    for warning in &interval.warnings {
        warn!(%warning, "proportion confidence interval");
    }
    debug!(p_hat, lower = interval.lower, upper = interval.upper, "proportion confidence interval");
    Ok(interval)
}

/// One-sample Wald z-test of `H₀: p = hypothesized_p`.
///
/// The standard error is taken from the observed proportion, so a sample with
/// no successes or no failures cannot be tested and yields a
/// [`DomainError::ZeroStandardError`].
///
/// # Returns
///
/// `TestResult` with the z-score and the p-value, `2·(1 - Φ(|z|))` or
/// `1 - Φ(|z|)` when `one_sided`.
pub fn proportion_test(
    successes: usize,
    trials: usize,
    hypothesized_p: f64,
    one_sided: bool,
) -> anyhow::Result<TestResult<f64>> {
    validate_counts(successes, trials)?;
    if !(0.0..=1.0).contains(&hypothesized_p) {
        bail!(DomainError::InvalidParameter(format!(
            "hypothesized proportion {hypothesized_p} must be in [0, 1]"
        )));
    }

    let (p_hat, standard_error) = proportion_and_standard_error(successes, trials);
    if standard_error == 0.0 {
        bail!(DomainError::ZeroStandardError(format!(
            "observed proportion {p_hat}"
        )));
    }

    let z = (p_hat - hypothesized_p) / standard_error;
    let p_value = normal_p_value(z, !one_sided)?;

    let result = TestResult::new(z, p_value)
        .with_standard_error(standard_error)
        .with_metadata("proportion", p_hat)
        .with_metadata("hypothesized_proportion", hypothesized_p);
    Ok(finish_test("proportion_test", result))
}

/// Two-sample pooled z-test of `H₀: p₁ = p₂`.
///
/// The test statistic is `(p̂₁ - p̂₂) / sqrt(p̄(1-p̄)(1/n₁ + 1/n₂))` with the
/// pooled proportion `p̄`. The p-value is two-sided.
pub fn two_sample_proportion_test(
    successes_1: usize,
    trials_1: usize,
    successes_2: usize,
    trials_2: usize,
) -> anyhow::Result<TestResult<f64>> {
    validate_counts(successes_1, trials_1)?;
    validate_counts(successes_2, trials_2)?;

    let n1 = trials_1 as f64;
    let n2 = trials_2 as f64;
    let p1 = successes_1 as f64 / n1;
    let p2 = successes_2 as f64 / n2;
    let pooled = (successes_1 as f64 + successes_2 as f64) / (n1 + n2);

    let standard_error = (pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2)).sqrt();
    if standard_error == 0.0 {
        bail!(DomainError::ZeroStandardError(format!(
            "pooled proportion {pooled}"
        )));
    }

    let z = (p1 - p2) / standard_error;
    let p_value = normal_p_value(z, true)?;

    let result = TestResult::new(z, p_value)
        .with_standard_error(standard_error)
        .with_metadata("proportion_1", p1)
        .with_metadata("proportion_2", p2)
        .with_metadata("pooled_proportion", pooled);
    Ok(finish_test("two_sample_proportion_test", result))
}
