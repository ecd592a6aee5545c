//! Reference distributions for the test statistics.
//!
//! Thin wrappers over `statrs` that turn invalid parameters into errors and
//! keep tail probabilities inside `[0, 1]`.

use anyhow::anyhow;
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

fn standard_normal() -> anyhow::Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| anyhow!("standard normal distribution: {e:?}"))
}

fn students_t(df: f64) -> anyhow::Result<StudentsT> {
    StudentsT::new(0.0, 1.0, df)
        .map_err(|e| anyhow!("Student-t distribution with {df} degrees of freedom: {e:?}"))
}

#[inline]
fn probability(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

fn check_quantile_level(p: f64) -> anyhow::Result<()> {
    if !(p > 0.0 && p < 1.0) {
        return Err(anyhow!("quantile level {p} must be in (0, 1)"));
    }
    Ok(())
}

/// Standard normal CDF `Φ(x)`.
pub fn normal_cdf(x: f64) -> anyhow::Result<f64> {
    Ok(standard_normal()?.cdf(x))
}

/// Standard normal quantile `Φ⁻¹(p)` for `p` in `(0, 1)`.
pub fn normal_quantile(p: f64) -> anyhow::Result<f64> {
    check_quantile_level(p)?;
    Ok(standard_normal()?.inverse_cdf(p))
}

/// `1 - Φ(|z|)`, doubled when `two_sided`.
pub fn normal_p_value(z: f64, two_sided: bool) -> anyhow::Result<f64> {
    if z.is_nan() {
        return Err(anyhow!("z statistic is NaN"));
    }
    let tail = 1.0 - normal_cdf(z.abs())?;
    let p = if two_sided { 2.0 * tail } else { tail };
    Ok(probability(p))
}

/// Student-t CDF with `df` degrees of freedom.
pub fn t_cdf(x: f64, df: f64) -> anyhow::Result<f64> {
    Ok(students_t(df)?.cdf(x))
}

/// Student-t quantile with `df` degrees of freedom.
pub fn t_quantile(p: f64, df: f64) -> anyhow::Result<f64> {
    check_quantile_level(p)?;
    Ok(students_t(df)?.inverse_cdf(p))
}

/// Two-sided p-value `2·(1 - F_t(|t|))`.
pub fn t_two_sided_p_value(t_stat: f64, df: f64) -> anyhow::Result<f64> {
    if t_stat.is_nan() {
        return Err(anyhow!("t statistic is NaN"));
    }
    if t_stat.is_infinite() {
        return Ok(0.0);
    }

    let cdf_val = t_cdf(t_stat.abs(), df)?;
    Ok(probability(2.0 * (1.0 - cdf_val)))
}

/// Upper tail `P(F > f)` of the F distribution.
pub fn f_upper_tail(f_stat: f64, df_numerator: f64, df_denominator: f64) -> anyhow::Result<f64> {
    if f_stat.is_nan() {
        return Err(anyhow!("F statistic is NaN"));
    }
    let f_dist = FisherSnedecor::new(df_numerator, df_denominator).map_err(|e| {
        anyhow!("F distribution with ({df_numerator}, {df_denominator}) degrees of freedom: {e:?}")
    })?;
    Ok(probability(1.0 - f_dist.cdf(f_stat)))
}

/// Upper tail `P(X > x)` of the chi-square distribution.
pub fn chi_square_upper_tail(chi_square: f64, df: f64) -> anyhow::Result<f64> {
    if chi_square.is_nan() {
        return Err(anyhow!("chi-square statistic is NaN"));
    }
    let chi_dist = ChiSquared::new(df)
        .map_err(|e| anyhow!("chi-square distribution with {df} degrees of freedom: {e:?}"))?;
    Ok(probability(1.0 - chi_dist.cdf(chi_square)))
}
