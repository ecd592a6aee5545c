//! Shannon entropy (natural log) of categorical data.

use crate::association::contingency::{build_contingency_table, ContingencyTable};
use crate::error::DomainError;
use crate::testing::utils::require_len;
use anyhow::bail;
use num_traits::ToPrimitive;
use std::collections::BTreeMap;
use tracing::debug;

fn entropy_of_frequencies(frequencies: &[f64]) -> anyhow::Result<f64> {
    let total: f64 = frequencies.iter().sum();
    if !total.is_finite() {
        bail!(DomainError::NonFinite("count total".to_string()));
    }
    if !(total > 0.0) {
        bail!(DomainError::InvalidParameter(
            "counts must not all be zero".to_string()
        ));
    }

    // 0 * ln(0) is taken as 0
    let h = -frequencies
        .iter()
        .map(|&c| c / total)
        .filter(|&p| p > 0.0)
        .map(|p| p * p.ln())
        .sum::<f64>();
    if !h.is_finite() {
        bail!(DomainError::NonFinite("entropy".to_string()));
    }
    // Rounding can leave a tiny negative residue
    Ok(h.max(0.0))
}

/// Entropy `-Σ pᵢ ln pᵢ` of the distribution proportional to `counts`.
///
/// Counts may be any non-negative numbers; they need not sum to one.
pub fn entropy<T>(counts: &[T]) -> anyhow::Result<f64>
where
    T: ToPrimitive,
{
    require_len(counts.len(), 1)?;

    let mut frequencies = Vec::with_capacity(counts.len());
    for count in counts {
        match count.to_f64() {
            Some(c) if c.is_finite() && c >= 0.0 => frequencies.push(c),
            Some(c) if c.is_finite() => bail!(DomainError::InvalidParameter(format!(
                "count {c} is negative"
            ))),
            _ => bail!(DomainError::NonFinite("counts".to_string())),
        }
    }
    entropy_of_frequencies(&frequencies)
}

/// Entropy of the value distribution of one categorical sample.
pub fn sample_entropy<L>(sample: &[L]) -> anyhow::Result<f64>
where
    L: Ord,
{
    require_len(sample.len(), 1)?;

    let mut value_counts: BTreeMap<&L, usize> = BTreeMap::new();
    for label in sample {
        *value_counts.entry(label).or_default() += 1;
    }
    let counts: Vec<usize> = value_counts.into_values().collect();
    entropy(&counts)
}

/// Entropy of the joint distribution stored in a contingency table.
pub fn table_entropy<A, B>(table: &ContingencyTable<A, B>) -> anyhow::Result<f64>
where
    A: Ord,
    B: Ord,
{
    let frequencies: Vec<f64> = table.counts().iter().map(|&c| c as f64).collect();
    entropy_of_frequencies(&frequencies)
}

/// Joint entropy `H(A, B)` of two equal-length categorical samples.
pub fn joint_entropy<A, B>(sample_a: &[A], sample_b: &[B]) -> anyhow::Result<f64>
where
    A: Ord + Clone,
    B: Ord + Clone,
{
    table_entropy(&build_contingency_table(sample_a, sample_b)?)
}

/// Mutual information `H(A) + H(B) - H(A, B)` of two categorical samples.
///
/// The marginal entropies come from the margins of the same contingency table
/// as the joint entropy. The result is never negative; rounding residue below
/// zero is clamped.
pub fn mutual_information<A, B>(sample_a: &[A], sample_b: &[B]) -> anyhow::Result<f64>
where
    A: Ord + Clone,
    B: Ord + Clone,
{
    let table = build_contingency_table(sample_a, sample_b)?;

    let h_a = entropy(&table.row_totals())?;
    let h_b = entropy(&table.col_totals())?;
    let h_ab = table_entropy(&table)?;
    let mi = (h_a + h_b - h_ab).max(0.0);

    debug!(h_a, h_b, h_ab, mutual_information = mi, "mutual information");
    Ok(mi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::LN_2;

    #[test]
    fn test_entropy_values() {
        assert_abs_diff_eq!(entropy(&[1, 1]).unwrap(), LN_2, epsilon = 1e-12);
        assert_abs_diff_eq!(entropy(&[5, 5, 5, 5]).unwrap(), 4.0_f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(entropy(&[7]).unwrap(), 0.0);
        // Zero counts contribute nothing
        assert_abs_diff_eq!(entropy(&[3.0, 0.0, 3.0]).unwrap(), LN_2, epsilon = 1e-12);
        // Non-normalised counts
        let h = -(0.25_f64 * 0.25_f64.ln() + 0.75 * 0.75_f64.ln());
        assert_abs_diff_eq!(entropy(&[1.0, 3.0]).unwrap(), h, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_invalid_counts() {
        let empty: [usize; 0] = [];
        assert!(entropy(&empty).is_err());
        assert!(entropy(&[0, 0]).is_err());
        assert!(entropy(&[1.0, -1.0]).is_err());
        assert!(entropy(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_entropy_overflowing_total() {
        // Each count is finite, their sum is not
        let err = entropy(&[1e308, 1e308]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NonFinite(_))
        ));

        // Scaled down, the same split is ln 2
        assert_abs_diff_eq!(entropy(&[1e307, 1e307]).unwrap(), LN_2, epsilon = 1e-12);

        // A share that underflows to zero contributes nothing
        assert_abs_diff_eq!(entropy(&[1e-320, 1e300]).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_entropy() {
        assert_abs_diff_eq!(sample_entropy(&["x", "y", "x", "y"]).unwrap(), LN_2, epsilon = 1e-12);
        assert_abs_diff_eq!(sample_entropy(&[4, 4, 4]).unwrap(), 0.0);
    }

    #[test]
    fn test_joint_entropy() {
        // Four equally likely pairs
        let a = [0, 0, 1, 1];
        let b = [0, 1, 0, 1];
        assert_abs_diff_eq!(joint_entropy(&a, &b).unwrap(), 4.0_f64.ln(), epsilon = 1e-12);
        // Identical samples: joint entropy equals the marginal
        assert_abs_diff_eq!(joint_entropy(&a, &a).unwrap(), LN_2, epsilon = 1e-12);
    }

    #[test]
    fn test_mutual_information() {
        let a = [0, 0, 1, 1];
        let b = [0, 1, 0, 1];
        assert_abs_diff_eq!(mutual_information(&a, &b).unwrap(), 0.0, epsilon = 1e-12);

        // Fully dependent: I(A; A) = H(A)
        let labels = ["a", "b", "c", "a", "b", "c"];
        assert_abs_diff_eq!(
            mutual_information(&labels, &labels).unwrap(),
            3.0_f64.ln(),
            epsilon = 1e-12
        );

        assert!(mutual_information(&a, &[0, 1]).is_err());
    }
}
