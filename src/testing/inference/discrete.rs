use crate::error::{DomainError, NumericalWarning};
use crate::testing::distributions::chi_square_upper_tail;
use crate::testing::effect::cramers_v;
use crate::testing::utils::finish_test;
use crate::testing::{ContinuityCorrection, TestResult};
use anyhow::bail;
use ndarray::{Array2, Axis};

/// Expected counts below this make the chi-square approximation unreliable.
const MIN_RELIABLE_EXPECTED: f64 = 5.0;

/// Expected cell frequencies `row_total * col_total / total` under independence.
pub fn expected_frequencies(observed: &Array2<usize>) -> anyhow::Result<Array2<f64>> {
    let (rows, cols) = observed.dim();
    if rows < 2 || cols < 2 {
        bail!(DomainError::DegenerateTable { rows, cols });
    }

    let row_totals = observed.sum_axis(Axis(1));
    let col_totals = observed.sum_axis(Axis(0));
    let total = observed.sum() as f64;

    let expected = Array2::from_shape_fn((rows, cols), |(i, j)| {
        row_totals[i] as f64 * col_totals[j] as f64 / total
    });

    if let Some(((row, col), _)) = expected.indexed_iter().find(|(_, e)| !(**e > 0.0)) {
        bail!(DomainError::ZeroExpectedCount { row, col });
    }
    Ok(expected)
}

/// Pearson chi-square test of independence on an `r x c` table of counts.
///
/// `χ² = Σ (O - E)² / E` with `(r - 1)(c - 1)` degrees of freedom. With
/// [`ContinuityCorrection::Yates`] and a single degree of freedom each
/// `|O - E|` is reduced by up to 0.5 before squaring.
///
/// # Returns
///
/// `TestResult` with the chi-square statistic, its upper-tail p-value and
/// Cramér's V as effect size.
pub fn chi_square_test(
    observed: &Array2<usize>,
    correction: ContinuityCorrection,
) -> anyhow::Result<TestResult<f64>> {
    let expected = expected_frequencies(observed)?;
    let (rows, cols) = observed.dim();
    let df = (rows - 1) * (cols - 1);
    let apply_yates = correction == ContinuityCorrection::Yates && df == 1;

    let chi_square: f64 = observed
        .iter()
        .zip(expected.iter())
        .map(|(&obs, &exp)| {
            let mut diff = (obs as f64 - exp).abs();
            if apply_yates {
                diff -= diff.min(0.5);
            }
            diff * diff / exp
        })
        .sum();

    let total = observed.sum();
    let p_value = chi_square_upper_tail(chi_square, df as f64)?;
    let effect_size = cramers_v(chi_square, total, rows, cols)?;
    let min_expected = expected.iter().copied().fold(f64::INFINITY, f64::min);

    let mut result = TestResult::with_effect_size(chi_square, p_value, effect_size)
        .with_degrees_of_freedom(df as f64)
        .with_metadata("total", total as f64)
        .with_metadata("min_expected", min_expected);
    if min_expected < MIN_RELIABLE_EXPECTED {
        result = result.with_warning(NumericalWarning::SmallExpectedCount { min_expected });
    }
    Ok(finish_test("chi_square_test", result))
}
