use crate::testing::utils::{extract_unique_labels, require_len, require_same_len};
use ndarray::{Array2, Axis};

/// Cross-tabulated counts of two categorical samples.
///
/// Rows are the distinct values of the first sample, columns those of the
/// second, both in sorted order. A cell is zero only when the pair never
/// occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable<A, B> {
    row_labels: Vec<A>,
    col_labels: Vec<B>,
    counts: Array2<usize>,
}

impl<A, B> ContingencyTable<A, B>
where
    A: Ord,
    B: Ord,
{
    pub fn row_labels(&self) -> &[A] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[B] {
        &self.col_labels
    }

    /// Counts indexed by `(row, column)` position.
    pub fn counts(&self) -> &Array2<usize> {
        &self.counts
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Number of observations cross-tabulated.
    pub fn total(&self) -> usize {
        self.counts.sum()
    }

    pub fn row_totals(&self) -> Vec<usize> {
        self.counts.sum_axis(Axis(1)).to_vec()
    }

    pub fn col_totals(&self) -> Vec<usize> {
        self.counts.sum_axis(Axis(0)).to_vec()
    }

    /// Count for the pair `(a, b)`, zero for labels that were never observed.
    pub fn get(&self, a: &A, b: &B) -> usize {
        match (self.row_labels.binary_search(a), self.col_labels.binary_search(b)) {
            (Ok(row), Ok(col)) => self.counts[[row, col]],
            _ => 0,
        }
    }

    /// All cells as `(row label, column label, count)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (&A, &B, usize)> + '_ {
        self.counts
            .indexed_iter()
            .map(|((row, col), &count)| (&self.row_labels[row], &self.col_labels[col], count))
    }
}

/// Cross-tabulate two equal-length categorical samples.
///
/// Runs in `O(n log k)` for `k` distinct labels.
pub fn build_contingency_table<A, B>(
    sample_a: &[A],
    sample_b: &[B],
) -> anyhow::Result<ContingencyTable<A, B>>
where
    A: Ord + Clone,
    B: Ord + Clone,
{
    require_same_len(sample_a.len(), sample_b.len())?;
    require_len(sample_a.len(), 1)?;

    let row_labels = extract_unique_labels(sample_a);
    let col_labels = extract_unique_labels(sample_b);

    let mut counts = Array2::<usize>::zeros((row_labels.len(), col_labels.len()));
    for (a, b) in sample_a.iter().zip(sample_b) {
        let row = row_labels.partition_point(|label| label < a);
        let col = col_labels.partition_point(|label| label < b);
        counts[[row, col]] += 1;
    }

    Ok(ContingencyTable {
        row_labels,
        col_labels,
        counts,
    })
}
