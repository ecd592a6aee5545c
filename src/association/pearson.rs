use crate::error::DomainError;
use crate::testing::distributions::{normal_quantile, t_two_sided_p_value};
use crate::testing::utils::{finish_test, require_len, require_same_len, to_f64_sample};
use crate::testing::TestResult;
use anyhow::bail;
use single_utilities::traits::FloatOps;

/// Confidence level of the Fisher-z interval attached to the result.
const CORRELATION_CONFIDENCE: f64 = 0.95;

/// Pearson product-moment correlation with a test of `H₀: ρ = 0`.
///
/// The p-value is two-sided, from `t = r·sqrt((n - 2) / (1 - r²))` with
/// `n - 2` degrees of freedom; a perfect correlation gives `p = 0`. When
/// `n > 3` and `|r| < 1` a 95% Fisher-z interval for ρ is attached.
///
/// # Returns
///
/// `TestResult` whose statistic is `r`; the t-statistic is stored in
/// `metadata["t_statistic"]` when finite.
pub fn correlation<T>(sample_a: &[T], sample_b: &[T]) -> anyhow::Result<TestResult<f64>>
where
    T: FloatOps,
{
    require_same_len(sample_a.len(), sample_b.len())?;
    require_len(sample_a.len(), 3)?;

    let x = to_f64_sample(sample_a, "sample_a")?;
    let y = to_f64_sample(sample_b, "sample_b")?;
    let n = x.len() as f64;

    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(&y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if !(sxx.is_finite() && syy.is_finite() && sxy.is_finite()) {
        bail!(DomainError::NonFinite("cross products".to_string()));
    }
    if !(sxx > 0.0) {
        bail!(DomainError::ZeroVariance("sample_a".to_string()));
    }
    if !(syy > 0.0) {
        bail!(DomainError::ZeroVariance("sample_b".to_string()));
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let df = n - 2.0;
    let residual = 1.0 - r * r;

    let mut result = if residual <= 0.0 {
        TestResult::new(r, 0.0)
    } else {
        let t_stat = r * (df / residual).sqrt();
        TestResult::new(r, t_two_sided_p_value(t_stat, df)?).with_metadata("t_statistic", t_stat)
    };
    result = result.with_degrees_of_freedom(df);

    if n > 3.0 && residual > 0.0 {
        let z = r.atanh();
        let standard_error = 1.0 / (n - 3.0).sqrt();
        let z_critical = normal_quantile(0.5 + CORRELATION_CONFIDENCE / 2.0)?;
        result = result
            .with_standard_error(standard_error)
            .with_confidence_interval(
                (z - z_critical * standard_error).tanh(),
                (z + z_critical * standard_error).tanh(),
            );
    }

    Ok(finish_test("correlation", result))
}
