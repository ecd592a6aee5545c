//! Parametric tests on sample means.
//!
//! This module implements Student-t based intervals and tests for one, two and
//! paired samples, and the one-way ANOVA F-test for several samples. Every
//! routine validates its input before computing anything; zero variance is an
//! error rather than an infinite statistic.

use crate::error::DomainError;
use crate::testing::distributions::{f_upper_tail, t_quantile, t_two_sided_p_value};
use crate::testing::effect::{cohens_d_from_summaries, eta_squared};
use crate::testing::utils::{
    finish_test, require_len, require_same_len, to_f64_sample, validate_confidence, SampleSummary,
};
use crate::testing::{ConfidenceInterval, TTestType, TestResult};
use anyhow::bail;
use single_utilities::traits::FloatOps;
use tracing::{debug, instrument, warn};

fn summarize<T>(sample: &[T], name: &str) -> anyhow::Result<SampleSummary>
where
    T: FloatOps,
{
    SampleSummary::from_values(&to_f64_sample(sample, name)?)
}

/// Confidence interval for the mean of a sample.
///
/// Uses the Student-t quantile with `n - 1` degrees of freedom:
/// `mean ± t_{(1+confidence)/2, n-1} · s/√n`.
///
/// # Arguments
///
/// * `sample` - Observations, at least two
/// * `confidence` - Confidence level in `(0, 1)`
pub fn mean_confidence_interval<T>(sample: &[T], confidence: f64) -> anyhow::Result<ConfidenceInterval>
where
    T: FloatOps,
{
    validate_confidence(confidence)?;
    let summary = summarize(sample, "sample")?;
    summary.require_variance("sample")?;

    let t_critical = t_quantile((1.0 + confidence) / 2.0, summary.degrees_of_freedom())?;
    let mut interval =
        ConfidenceInterval::symmetric(summary.mean, summary.standard_error(), t_critical, confidence);
    if let Some(warning) = summary.variance_warning() {
        warn!(%warning, "mean confidence interval");
        interval = interval.with_warning(warning);
    }

    debug!(
        mean = summary.mean,
        lower = interval.lower,
        upper = interval.upper,
        "mean confidence interval"
    );
    Ok(interval)
}

fn one_sample_from_summary(
    summary: &SampleSummary,
    hypothesized_mean: f64,
    context: &str,
) -> anyhow::Result<TestResult<f64>> {
    summary.require_variance(context)?;

    let standard_error = summary.standard_error();
    let df = summary.degrees_of_freedom();
    let t_stat = (summary.mean - hypothesized_mean) / standard_error;
    if !t_stat.is_finite() {
        bail!(DomainError::NonFinite(format!("{context} mean difference")));
    }
    let p_value = t_two_sided_p_value(t_stat, df)?;
    let effect_size = (summary.mean - hypothesized_mean) / summary.std_dev();

    let mut result = TestResult::with_effect_size(t_stat, p_value, effect_size)
        .with_degrees_of_freedom(df)
        .with_standard_error(standard_error)
        .with_metadata("mean", summary.mean);
    if let Some(warning) = summary.variance_warning() {
        result = result.with_warning(warning);
    }
    Ok(result)
}

/// One-sample t-test of `H₀: mean = hypothesized_mean`.
///
/// # Returns
///
/// `TestResult` with the t-statistic, the two-sided p-value, `n - 1` degrees
/// of freedom and the one-sample Cohen's d as effect size.
pub fn one_sample_mean_test<T>(sample: &[T], hypothesized_mean: f64) -> anyhow::Result<TestResult<f64>>
where
    T: FloatOps,
{
    if !hypothesized_mean.is_finite() {
        bail!(DomainError::NonFinite("hypothesized mean".to_string()));
    }
    let summary = summarize(sample, "sample")?;
    let result = one_sample_from_summary(&summary, hypothesized_mean, "sample")?;
    Ok(finish_test("one_sample_mean_test", result))
}

/// Independent two-sample t-test assuming equal variances.
///
/// Shorthand for [`two_sample_mean_test_with`] with [`TTestType::Student`]:
/// pooled variance, `n₁ + n₂ - 2` degrees of freedom.
pub fn two_sample_mean_test<T>(sample_a: &[T], sample_b: &[T]) -> anyhow::Result<TestResult<f64>>
where
    T: FloatOps,
{
    two_sample_mean_test_with(sample_a, sample_b, TTestType::Student)
}

/// Perform a t-test comparing two independent samples.
///
/// This function performs either Student's t-test (assuming equal variances) or
/// Welch's t-test (allowing unequal variances) on two samples. Each sample
/// needs at least two observations.
///
/// # Arguments
///
/// * `sample_a` - First sample
/// * `sample_b` - Second sample
/// * `test_type` - Type of t-test to perform
pub fn two_sample_mean_test_with<T>(
    sample_a: &[T],
    sample_b: &[T],
    test_type: TTestType,
) -> anyhow::Result<TestResult<f64>>
where
    T: FloatOps,
{
    let first = summarize(sample_a, "sample_a")?;
    let second = summarize(sample_b, "sample_b")?;
    let result = t_test_from_summaries(&first, &second, test_type)?;
    Ok(finish_test("two_sample_mean_test", result))
}

/// Perform a t-test using precomputed summary statistics.
///
/// # Arguments
///
/// * `first`, `second` - Size, mean and unbiased variance of each group
/// * `test_type` - Type of t-test to perform (Student's or Welch's)
///
/// # Returns
///
/// `TestResult` containing the t-statistic and p-value, the degrees of freedom
/// used and Cohen's d.
pub fn t_test_from_summaries(
    first: &SampleSummary,
    second: &SampleSummary,
    test_type: TTestType,
) -> anyhow::Result<TestResult<f64>> {
    let n1 = first.n as f64;
    let n2 = second.n as f64;
    let var1 = first.variance;
    let var2 = second.variance;

    if [first.mean, second.mean, var1, var2].iter().any(|v| !v.is_finite()) {
        bail!(DomainError::NonFinite("sample summaries".to_string()));
    }
    if !(var1 > 0.0) && !(var2 > 0.0) {
        bail!(DomainError::ZeroVariance("both samples".to_string()));
    }

    let mean_diff = first.mean - second.mean;

    let (standard_error, df) = match test_type {
        TTestType::Student => {
            // Student's t-test (pooled variance)
            let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0);
            ((pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt(), n1 + n2 - 2.0)
        }
        TTestType::Welch => {
            // Welch's t-test (unequal variances)
            let term1 = var1 / n1;
            let term2 = var2 / n2;
            let combined_var = term1 + term2;

            // Welch-Satterthwaite equation for degrees of freedom
            let df = combined_var * combined_var
                / (term1 * term1 / (n1 - 1.0) + term2 * term2 / (n2 - 1.0));
            (combined_var.sqrt(), df)
        }
    };

    if !mean_diff.is_finite() || !standard_error.is_finite() || !df.is_finite() {
        bail!(DomainError::NonFinite("mean difference or standard error".to_string()));
    }

    let t_stat = mean_diff / standard_error;
    if !t_stat.is_finite() {
        bail!(DomainError::NonFinite("t statistic".to_string()));
    }
    let p_value = t_two_sided_p_value(t_stat, df)?;
    let effect_size = cohens_d_from_summaries(first, second)?;

    let mut result = TestResult::with_effect_size(t_stat, p_value, effect_size)
        .with_degrees_of_freedom(df)
        .with_standard_error(standard_error)
        .with_metadata("mean_a", first.mean)
        .with_metadata("mean_b", second.mean);
    for warning in [first.variance_warning(), second.variance_warning()]
        .into_iter()
        .flatten()
    {
        result = result.with_warning(warning);
    }
    Ok(result)
}

/// Paired-sample t-test on the differences `sample_a[i] - sample_b[i]`.
///
/// Both samples must have the same length; observations are matched by
/// position.
pub fn paired_sample_mean_test<T>(sample_a: &[T], sample_b: &[T]) -> anyhow::Result<TestResult<f64>>
where
    T: FloatOps,
{
    require_same_len(sample_a.len(), sample_b.len())?;

    let a = to_f64_sample(sample_a, "sample_a")?;
    let b = to_f64_sample(sample_b, "sample_b")?;
    let differences: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x - y).collect();

    let summary = SampleSummary::from_values(&differences)?;
    let result = one_sample_from_summary(&summary, 0.0, "paired differences")?;
    Ok(finish_test("paired_sample_mean_test", result))
}

/// One-way ANOVA F-test of `H₀: all group means are equal`.
///
/// `F = (SS_between / (k - 1)) / (SS_within / (N - k))`. Requires at least two
/// non-empty samples and `N > k`.
///
/// # Returns
///
/// `TestResult` with F, its upper-tail p-value and η² as effect size; the
/// degrees of freedom and sums of squares are stored in `metadata`.
#[instrument(level = "debug", skip_all, fields(groups = sample_set.len()))]
pub fn multi_sample_mean_test<T>(sample_set: &[&[T]]) -> anyhow::Result<TestResult<f64>>
where
    T: FloatOps,
{
    let k = sample_set.len();
    require_len(k, 2)?;

    let mut groups = Vec::with_capacity(k);
    for (idx, sample) in sample_set.iter().enumerate() {
        let values = to_f64_sample(sample, &format!("sample {idx}"))?;
        require_len(values.len(), 1)?;
        groups.push(values);
    }

    let total_n: usize = groups.iter().map(Vec::len).sum();
    if total_n <= k {
        bail!(DomainError::InsufficientData {
            expected: k + 1,
            actual: total_n,
        });
    }

    let grand_mean = groups.iter().flatten().sum::<f64>() / total_n as f64;
    let group_means: Vec<f64> = groups
        .iter()
        .map(|g| g.iter().sum::<f64>() / g.len() as f64)
        .collect();

    let ss_between: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &gm)| g.len() as f64 * (gm - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &gm)| g.iter().map(|&x| (x - gm).powi(2)).sum::<f64>())
        .sum();

    if !grand_mean.is_finite() || !ss_between.is_finite() || !ss_within.is_finite() {
        bail!(DomainError::NonFinite("sums of squares".to_string()));
    }
    if !(ss_within > 0.0) {
        bail!(DomainError::ZeroVariance("within-group variation".to_string()));
    }

    let df_between = (k - 1) as f64;
    let df_within = (total_n - k) as f64;
    let f_stat = (ss_between / df_between) / (ss_within / df_within);
    if !f_stat.is_finite() {
        bail!(DomainError::NonFinite("F statistic".to_string()));
    }
    let p_value = f_upper_tail(f_stat, df_between, df_within)?;
    let effect_size = eta_squared(ss_between, ss_between + ss_within)?;

    let result = TestResult::with_effect_size(f_stat, p_value, effect_size)
        .with_degrees_of_freedom(df_between)
        .with_metadata("df_between", df_between)
        .with_metadata("df_within", df_within)
        .with_metadata("ss_between", ss_between)
        .with_metadata("ss_within", ss_within)
        .with_metadata("grand_mean", grand_mean);
    Ok(finish_test("multi_sample_mean_test", result))
}
