use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use single_inference::association::{
    build_contingency_table, chi_square_independence_test, correlation, mutual_information,
};
use single_inference::testing::inference::parametric::{
    mean_confidence_interval, multi_sample_mean_test, one_sample_mean_test,
    paired_sample_mean_test, two_sample_mean_test,
};
use single_inference::testing::inference::proportion::{
    proportion_confidence_interval, proportion_test, two_sample_proportion_test,
};
use single_inference::DomainError;

#[cfg(test)]
mod quick_test {
    use super::*;

    #[test]
    fn check_observed_proportion_is_not_significant() {
        // Testing the observed proportion against itself
        let result = proportion_test(50, 100, 0.5, false).unwrap();
        assert_abs_diff_eq!(result.statistic, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.p_value, 1.0, epsilon = 1e-12);

        let result = proportion_test(37, 80, 37.0 / 80.0, false).unwrap();
        assert_abs_diff_eq!(result.p_value, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn check_zero_variance_interval_is_rejected() {
        let err = mean_confidence_interval(&[10.0, 10.0, 10.0, 10.0], 0.95).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::ZeroVariance(_))
        ));
    }

    #[test]
    fn check_paired_length_mismatch() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [1.5, 2.5, 2.0, 4.5, 5.5, 6.0];
        let err = paired_sample_mean_test(&a, &b).unwrap_err();
        assert!(err.is::<DomainError>());
    }

    #[test]
    fn check_perfect_correlation() {
        let result = correlation(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
        assert_abs_diff_eq!(result.statistic, 1.0, epsilon = 1e-12);
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn check_perfectly_associated_categories() {
        let categories = ["A", "B", "AB", "O"];
        let sample: Vec<&str> = (0..100).map(|i| categories[(i * 7) % 4]).collect();
        let result = chi_square_independence_test(&sample, &sample).unwrap();
        assert!(result.p_value < 1e-10, "p = {}", result.p_value);
    }

    #[test]
    fn check_means_that_clearly_differ() {
        let low = [1.0, 2.0, 3.0, 2.0, 2.0];
        let high = [9.0, 10.0, 11.0, 10.0, 10.0];

        let result = two_sample_mean_test(&high, &low).unwrap();
        assert!(result.p_value < 0.001);
        assert!(result.statistic > 5.0);

        let result = one_sample_mean_test(&high, 2.0).unwrap();
        assert!(result.p_value < 0.001);

        let mid = [5.0, 6.0, 5.5, 4.5, 6.0];
        let result = multi_sample_mean_test(&[&low[..], &mid[..], &high[..]]).unwrap();
        assert!(result.p_value < 0.001);
        assert!(result.statistic > 0.0);
    }

    #[test]
    fn check_same_means_high_variance() {
        let a = [1.0, 10.0, 2.0, 9.0, 3.0];
        let b = [2.0, 8.0, 4.0, 7.0, 4.0];
        let result = two_sample_mean_test(&a, &b).unwrap();
        assert!(result.p_value > 0.9, "p = {}", result.p_value);
        assert!(result.statistic.abs() < 0.001);
    }
}

proptest! {
    #[test]
    fn proportion_interval_contains_estimate(
        trials in 1usize..500,
        fraction in 0.0f64..=1.0,
        confidence in 0.5f64..0.999,
    ) {
        let successes = ((trials as f64) * fraction).round() as usize;
        let p_hat = successes as f64 / trials as f64;
        let ci = proportion_confidence_interval(successes, trials, confidence).unwrap();
        prop_assert!(ci.lower <= p_hat && p_hat <= ci.upper);
    }

    #[test]
    fn proportion_interval_narrows_with_confidence(
        trials in 1usize..500,
        fraction in 0.0f64..=1.0,
        low in 0.5f64..0.9,
        gap in 0.01f64..0.09,
    ) {
        let successes = ((trials as f64) * fraction).round() as usize;
        let narrow = proportion_confidence_interval(successes, trials, low).unwrap();
        let wide = proportion_confidence_interval(successes, trials, low + gap).unwrap();
        prop_assert!(narrow.width() <= wide.width());
    }

    #[test]
    fn two_sample_proportion_swap_negates_z(
        trials_1 in 1usize..300,
        trials_2 in 1usize..300,
        f1 in 0.0f64..=1.0,
        f2 in 0.0f64..=1.0,
    ) {
        let s1 = ((trials_1 as f64) * f1).round() as usize;
        let s2 = ((trials_2 as f64) * f2).round() as usize;
        if let (Ok(forward), Ok(backward)) = (
            two_sample_proportion_test(s1, trials_1, s2, trials_2),
            two_sample_proportion_test(s2, trials_2, s1, trials_1),
        ) {
            prop_assert!((forward.statistic + backward.statistic).abs() < 1e-9);
            prop_assert!((forward.p_value - backward.p_value).abs() < 1e-12);
        }
    }

    #[test]
    fn t_test_p_values_bounded(
        a in proptest::collection::vec(-1e3f64..1e3, 2..=20),
        b in proptest::collection::vec(-1e3f64..1e3, 2..=20),
    ) {
        if let Ok(result) = two_sample_mean_test(&a, &b) {
            prop_assert!((0.0..=1.0).contains(&result.p_value), "p = {}", result.p_value);
        }
        if let Ok(result) = one_sample_mean_test(&a, 0.0) {
            prop_assert!((0.0..=1.0).contains(&result.p_value), "p = {}", result.p_value);
        }
    }

    #[test]
    fn contingency_cells_sum_to_sample_size(
        pairs in proptest::collection::vec((0u8..5, 0u8..3), 1..200),
    ) {
        let (a, b): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
        let table = build_contingency_table(&a, &b).unwrap();
        prop_assert_eq!(table.counts().iter().sum::<usize>(), a.len());
    }

    #[test]
    fn mutual_information_is_non_negative(
        pairs in proptest::collection::vec((0u8..4, 0u8..4), 1..200),
    ) {
        let (a, b): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
        let mi = mutual_information(&a, &b).unwrap();
        prop_assert!(mi >= -1e-12, "mi = {}", mi);
        prop_assert!(mi.is_finite());
    }

    #[test]
    fn chi_square_p_values_bounded(
        pairs in proptest::collection::vec((0u8..3, 0u8..3), 2..200),
    ) {
        let (a, b): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
        if let Ok(result) = chi_square_independence_test(&a, &b) {
            prop_assert!((0.0..=1.0).contains(&result.p_value));
            prop_assert!(result.statistic >= 0.0);
        }
    }
}
