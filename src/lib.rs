//! # single-inference
//!
//! Classical hypothesis tests and confidence intervals, part of the single-rust ecosystem.
//!
//! This crate provides the standard inferential statistics for summary counts and raw samples:
//! proportion intervals and z-tests, Student-t based mean tests, one-way ANOVA, Pearson correlation,
//! and the chi-square, entropy and mutual-information measures of categorical association. Every
//! routine is a pure function over borrowed input; reference distributions come from `statrs`.
//!
//! ## Core Features
//!
//! - **Proportions**: Wald confidence interval, one-sample and pooled two-sample z-tests
//! - **Means**: t-based confidence interval, one-sample, two-sample (Student or Welch) and paired t-tests,
//!   one-way ANOVA
//! - **Association**: Pearson correlation, contingency tables, chi-square independence test,
//!   entropy, joint entropy and mutual information
//! - **Effect Sizes**: Cohen's d, Hedges' g, η² and Cramér's V
//!
//! ## Quick Start
//!
//! ```rust
//! use single_inference::testing::inference::proportion::two_sample_proportion_test;
//! use single_inference::testing::inference::parametric::mean_confidence_interval;
//!
//! // 60 of 100 visitors converted on variant A, 40 of 100 on variant B
//! let result = two_sample_proportion_test(60, 100, 40, 100).unwrap();
//! assert!(result.is_significant(0.01));
//!
//! let ci = mean_confidence_interval(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 0.95).unwrap();
//! assert!(ci.contains(5.0));
//! ```
//!
//! Invalid or degenerate input (zero trials, zero variance, mismatched paired samples, empty
//! contingency cells) is reported as an [`error::DomainError`] inside the returned
//! `anyhow::Error`. Borderline but valid results carry [`error::NumericalWarning`]s.
//!
//! ## Module Organization
//!
//! - **[`testing`]**: Result types, proportion and mean tests, effect sizes, reference distributions
//! - **[`association`]**: Correlation, contingency tables, chi-square, entropy and mutual information
//! - **[`error`]**: Domain errors and numerical warnings

pub mod association;
pub mod error;
pub mod testing;

pub use error::{DomainError, NumericalWarning};
pub use testing::{ConfidenceInterval, ContinuityCorrection, TTestType, TestResult};
