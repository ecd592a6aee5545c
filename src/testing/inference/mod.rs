use crate::association;
use crate::testing::{ConfidenceInterval, TTestType, TestResult};
use single_utilities::traits::FloatOps;

pub mod discrete;

pub mod parametric;

pub mod proportion;

/// Method-call access to the numeric-sample tests.
///
/// Implemented for slices, so it is available on arrays and `Vec`s as well:
///
/// ```
/// use single_inference::testing::inference::SampleStatTests;
///
/// let morning = vec![10.0, 12.0, 9.0, 14.0, 11.0];
/// let evening = vec![12.0, 14.0, 10.0, 15.0, 14.0];
/// let result = morning.paired_sample_mean_test(&evening).unwrap();
/// assert!(result.p_value < 0.01);
/// ```
pub trait SampleStatTests<T>
where
    T: FloatOps,
{
    fn mean_confidence_interval(&self, confidence: f64) -> anyhow::Result<ConfidenceInterval>;

    fn one_sample_mean_test(&self, hypothesized_mean: f64) -> anyhow::Result<TestResult<f64>>;

    fn two_sample_mean_test(
        &self,
        other: &[T],
        test_type: TTestType,
    ) -> anyhow::Result<TestResult<f64>>;

    fn paired_sample_mean_test(&self, other: &[T]) -> anyhow::Result<TestResult<f64>>;

    fn correlation(&self, other: &[T]) -> anyhow::Result<TestResult<f64>>;
}

impl<T> SampleStatTests<T> for [T]
where
    T: FloatOps,
{
    fn mean_confidence_interval(&self, confidence: f64) -> anyhow::Result<ConfidenceInterval> {
        parametric::mean_confidence_interval(self, confidence)
    }

    fn one_sample_mean_test(&self, hypothesized_mean: f64) -> anyhow::Result<TestResult<f64>> {
        parametric::one_sample_mean_test(self, hypothesized_mean)
    }

    fn two_sample_mean_test(
        &self,
        other: &[T],
        test_type: TTestType,
    ) -> anyhow::Result<TestResult<f64>> {
        parametric::two_sample_mean_test_with(self, other, test_type)
    }

    fn paired_sample_mean_test(&self, other: &[T]) -> anyhow::Result<TestResult<f64>> {
        parametric::paired_sample_mean_test(self, other)
    }

    fn correlation(&self, other: &[T]) -> anyhow::Result<TestResult<f64>> {
        association::correlation(self, other)
    }
}
