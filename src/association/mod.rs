//! Association between two variables.
//!
//! Pearson correlation for numeric samples; contingency tables, the
//! chi-square independence test, entropy and mutual information for
//! categorical samples. Categorical routines accept any `Ord` label type
//! (strings, integers, enums) and order categories by sorting.
//!
//! ## Quick Example
//!
//! ```rust
//! use single_inference::association::{chi_square_independence_test, mutual_information};
//!
//! let blood_type = ["A", "B", "O", "A", "B", "O", "A", "B"];
//! let group = ["x", "y", "x", "x", "y", "x", "x", "y"];
//!
//! let result = chi_square_independence_test(&blood_type, &group).unwrap();
//! assert!(result.p_value > 0.0 && result.p_value <= 1.0);
//! assert!(mutual_information(&blood_type, &group).unwrap() >= 0.0);
//! ```

mod contingency;
mod entropy;
mod pearson;

pub use contingency::{build_contingency_table, ContingencyTable};
pub use entropy::{entropy, joint_entropy, mutual_information, sample_entropy, table_entropy};
pub use pearson::correlation;

use crate::testing::inference::discrete;
use crate::testing::{ContinuityCorrection, TestResult};
use tracing::instrument;

/// Chi-square test of independence between two categorical samples.
///
/// Builds the contingency table and computes Pearson's `Σ (O - E)² / E` with
/// `(rows - 1)(cols - 1)` degrees of freedom, without continuity correction.
/// Both samples need at least two distinct values; otherwise the table is
/// degenerate and a [`DomainError`](crate::error::DomainError) is returned.
#[instrument(level = "debug", skip_all, fields(n = sample_a.len()))]
pub fn chi_square_independence_test<A, B>(
    sample_a: &[A],
    sample_b: &[B],
) -> anyhow::Result<TestResult<f64>>
where
    A: Ord + Clone,
    B: Ord + Clone,
{
    let table = build_contingency_table(sample_a, sample_b)?;
    chi_square_contingency(&table, ContinuityCorrection::None)
}

/// Chi-square test of independence on a prebuilt contingency table.
pub fn chi_square_contingency<A, B>(
    table: &ContingencyTable<A, B>,
    correction: ContinuityCorrection,
) -> anyhow::Result<TestResult<f64>>
where
    A: Ord,
    B: Ord,
{
    discrete::chi_square_test(table.counts(), correction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use approx::assert_abs_diff_eq;

    fn repeat_labels(labels: &[&'static str], counts: &[usize]) -> Vec<&'static str> {
        labels
            .iter()
            .zip(counts)
            .flat_map(|(&label, &count)| std::iter::repeat(label).take(count))
            .collect()
    }

    #[test]
    fn test_chi_square_from_samples() {
        // Table [[30, 10], [20, 40]] with rows "a"/"b" and columns "x"/"y"
        let a = repeat_labels(&["a", "a", "b", "b"], &[30, 10, 20, 40]);
        let b = repeat_labels(&["x", "y", "x", "y"], &[30, 10, 20, 40]);

        let result = chi_square_independence_test(&a, &b).unwrap();
        assert_abs_diff_eq!(result.statistic, 16.666667, epsilon = 1e-5);
        assert_abs_diff_eq!(result.p_value, 4.455709e-5, epsilon = 1e-8);

        let table = build_contingency_table(&a, &b).unwrap();
        let corrected = chi_square_contingency(&table, ContinuityCorrection::Yates).unwrap();
        assert_abs_diff_eq!(corrected.statistic, 15.041667, epsilon = 1e-5);
    }

    #[test]
    fn test_chi_square_perfect_association() {
        let labels = ["w", "x", "y", "z"];
        let a: Vec<&str> = (0..100).map(|i| labels[i % 4]).collect();

        let result = chi_square_independence_test(&a, &a).unwrap();
        assert_abs_diff_eq!(result.statistic, 300.0, epsilon = 1e-9);
        assert_eq!(result.degrees_of_freedom, Some(9.0));
        assert!(result.p_value < 1e-10);
        assert_abs_diff_eq!(result.effect_size.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_chi_square_single_category() {
        let err = chi_square_independence_test(&[1, 1, 1], &[1, 2, 3]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::DegenerateTable { rows: 1, cols: 3 })
        );
    }
}
