use crate::error::NumericalWarning;
use single_utilities::traits::FloatOps;
use std::collections::HashMap;

pub mod distributions;
pub mod effect;
pub mod inference;

pub mod utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTestType {
    Student, // Equal variance
    Welch,   // Unequal variance
}

/// Continuity correction applied to chi-square tests with one degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinuityCorrection {
    #[default]
    None,
    Yates,
}

#[derive(Debug, Clone)]
pub struct TestResult<T> {
    /// The test statistic value (e.g., z, t, F, chi-square, Pearson r)
    pub statistic: T,
    /// The p-value of the test
    pub p_value: T,
    /// Confidence interval for the estimated quantity (if available)
    pub confidence_interval: Option<(T, T)>,
    /// Degrees of freedom of the reference distribution
    pub degrees_of_freedom: Option<T>,
    /// Effect size measurement
    pub effect_size: Option<T>,
    /// Standard error of the estimate entering the statistic
    pub standard_error: Option<T>,
    /// Additional test-specific information
    pub metadata: HashMap<String, T>,
    /// Non-fatal numerical caveats about this result
    pub warnings: Vec<NumericalWarning>,
}

impl<T> TestResult<T>
where
    T: FloatOps,
{
    /// Create a new test result with minimal information
    pub fn new(statistic: T, p_value: T) -> Self {
        TestResult {
            statistic,
            p_value,
            confidence_interval: None,
            degrees_of_freedom: None,
            effect_size: None,
            standard_error: None,
            metadata: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a new test result with effect size
    pub fn with_effect_size(statistic: T, p_value: T, effect_size: T) -> Self {
        let mut result = Self::new(statistic, p_value);
        result.effect_size = Some(effect_size);
        result
    }

    /// Add confidence interval to the result
    pub fn with_confidence_interval(mut self, lower: T, upper: T) -> Self {
        self.confidence_interval = Some((lower, upper));
        self
    }

    /// Add degrees of freedom to the result
    pub fn with_degrees_of_freedom(mut self, df: T) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }

    /// Add standard error to the result
    pub fn with_standard_error(mut self, se: T) -> Self {
        self.standard_error = Some(se);
        self
    }

    /// Add additional metadata
    pub fn with_metadata(mut self, key: &str, value: T) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn with_warning(mut self, warning: NumericalWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Check if the result is statistically significant at the given threshold
    pub fn is_significant(&self, alpha: T) -> bool {
        self.p_value < alpha
    }

    /// The `(statistic, p_value)` pair.
    pub fn as_pair(&self) -> (T, T) {
        (self.statistic, self.p_value)
    }
}

/// Two-sided confidence interval around a point estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// Point estimate the interval is centred on
    pub estimate: f64,
    pub standard_error: f64,
    /// Quantile of the reference distribution scaling the standard error
    pub critical_value: f64,
    pub confidence: f64,
    pub warnings: Vec<NumericalWarning>,
}

impl ConfidenceInterval {
    /// Symmetric interval `estimate ± critical_value * standard_error`.
    pub fn symmetric(
        estimate: f64,
        standard_error: f64,
        critical_value: f64,
        confidence: f64,
    ) -> Self {
        let half_width = critical_value * standard_error;
        ConfidenceInterval {
            lower: estimate - half_width,
            upper: estimate + half_width,
            estimate,
            standard_error,
            critical_value,
            confidence,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: NumericalWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_result_builder() {
        let result = TestResult::new(2.5, 0.012)
            .with_degrees_of_freedom(9.0)
            .with_standard_error(0.4)
            .with_metadata("mean", 1.0);

        assert_eq!(result.as_pair(), (2.5, 0.012));
        assert_eq!(result.degrees_of_freedom, Some(9.0));
        assert_eq!(result.metadata.get("mean"), Some(&1.0));
        assert!(result.is_significant(0.05));
        assert!(!result.is_significant(0.01));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_symmetric_interval() {
        let ci = ConfidenceInterval::symmetric(10.0, 0.5, 2.0, 0.95);
        assert_abs_diff_eq!(ci.lower, 9.0);
        assert_abs_diff_eq!(ci.upper, 11.0);
        assert_abs_diff_eq!(ci.width(), 2.0);
        assert!(ci.contains(10.0));
        assert!(!ci.contains(11.5));
        assert_eq!(ci.as_tuple(), (9.0, 11.0));
    }
}
