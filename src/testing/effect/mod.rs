use crate::error::DomainError;
use crate::testing::utils::{to_f64_sample, SampleSummary};
use anyhow::bail;
use single_utilities::traits::FloatOps;

/// Cohen's d from two sample summaries, `(mean1 - mean2) / pooled_sd`.
pub fn cohens_d_from_summaries(first: &SampleSummary, second: &SampleSummary) -> anyhow::Result<f64> {
    let n1 = first.n as f64;
    let n2 = second.n as f64;
    let pooled_sd =
        ((n1 - 1.0) * first.variance + (n2 - 1.0) * second.variance).sqrt() / (n1 + n2 - 2.0).sqrt();

    if !pooled_sd.is_finite() {
        bail!(DomainError::NonFinite("pooled standard deviation".to_string()));
    }
    if !(pooled_sd > 0.0) {
        bail!(DomainError::ZeroVariance("pooled standard deviation".to_string()));
    }

    Ok((first.mean - second.mean) / pooled_sd)
}

/// Calculate Cohen's d effect size between two samples
pub fn cohens_d<T>(group1: &[T], group2: &[T]) -> anyhow::Result<f64>
where
    T: FloatOps,
{
    let first = SampleSummary::from_values(&to_f64_sample(group1, "group1")?)?;
    let second = SampleSummary::from_values(&to_f64_sample(group2, "group2")?)?;
    cohens_d_from_summaries(&first, &second)
}

/// Calculate Hedge's g (bias-corrected effect size)
pub fn hedges_g<T>(group1: &[T], group2: &[T]) -> anyhow::Result<f64>
where
    T: FloatOps,
{
    // First calculate Cohen's d
    let d = cohens_d(group1, group2)?;

    let n = (group1.len() + group2.len()) as f64;

    // Correction factor J
    let j = 1.0 - 3.0 / (4.0 * (n - 2.0) - 1.0);

    Ok(j * d)
}

/// Proportion of total variance explained by group membership.
pub fn eta_squared(ss_between: f64, ss_total: f64) -> anyhow::Result<f64> {
    if !ss_between.is_finite() || !ss_total.is_finite() {
        bail!(DomainError::NonFinite("sums of squares".to_string()));
    }
    if !(ss_total > 0.0) {
        bail!(DomainError::ZeroVariance("total sum of squares".to_string()));
    }
    Ok((ss_between / ss_total).clamp(0.0, 1.0))
}

/// Cramér's V for an `rows x cols` contingency table with `n` observations.
pub fn cramers_v(chi_square: f64, n: usize, rows: usize, cols: usize) -> anyhow::Result<f64> {
    let min_dim = rows.min(cols);
    if n == 0 || min_dim < 2 {
        bail!(DomainError::DegenerateTable { rows, cols });
    }
    Ok((chi_square / (n as f64 * (min_dim - 1) as f64)).sqrt().min(1.0))
}
