//! Property tests for the Hampel filter

use hampel::{hampel, HampelFilter, RawParam, Validator, WindowStrategy};
use proptest::prelude::*;

fn ramp(n: usize, start: i32, slope: i32) -> Vec<f64> {
    (0..n).map(|i| (start + slope * i as i32) as f64).collect()
}

proptest! {
    #[test]
    fn sorted_and_naive_strategies_agree(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 0..200),
        window_size in 1usize..20,
        n_sigma in 0.0f64..6.0,
    ) {
        let sorted = hampel(&values, window_size, n_sigma).unwrap();
        let naive = HampelFilter::new(window_size, n_sigma)
            .unwrap()
            .with_strategy(WindowStrategy::Naive)
            .filter(&values)
            .unwrap();
        prop_assert_eq!(sorted, naive);
    }

    #[test]
    fn result_arrays_align_with_input(
        values in prop::collection::vec(-50.0f32..50.0, 0..100),
        window_size in 1usize..12,
    ) {
        let result = hampel(&values, window_size, 3.0).unwrap();
        prop_assert_eq!(result.filtered_data.len(), values.len());
        prop_assert_eq!(result.medians.len(), values.len());
        prop_assert_eq!(result.median_absolute_deviations.len(), values.len());
        prop_assert_eq!(result.thresholds.len(), values.len());
        prop_assert!(result.outlier_indices.windows(2).all(|w| w[0] < w[1]));

        for (i, (&v, &f)) in values.iter().zip(&result.filtered_data).enumerate() {
            if result.is_outlier(i) {
                prop_assert_eq!(f, result.medians[i]);
            } else {
                prop_assert_eq!(f, v);
            }
        }
    }

    #[test]
    fn raising_n_sigma_never_adds_outliers(
        values in prop::collection::vec(-100.0f64..100.0, 1..150),
        window_size in 1usize..10,
        low in 0.0f64..5.0,
        extra in 0.0f64..5.0,
    ) {
        let tight = hampel(&values, window_size, low).unwrap();
        let loose = hampel(&values, window_size, low + extra).unwrap();
        prop_assert!(loose.outlier_count() <= tight.outlier_count());
        prop_assert!(loose.outlier_indices.iter().all(|i| tight.is_outlier(*i)));
    }

    #[test]
    fn linear_sequences_pass_through(
        n in 1usize..120,
        start in -100i32..100,
        slope in -5i32..=5,
        window_size in 1usize..15,
    ) {
        let values = ramp(n, start, slope);
        let result = hampel(&values, window_size, 3.0).unwrap();
        prop_assert_eq!(&result.filtered_data, &values);
        prop_assert!(result.outlier_indices.is_empty());
    }

    #[test]
    fn oversized_window_leaves_constant_data_alone(
        n in 1usize..60,
        level in -1.0e3f64..1.0e3,
    ) {
        let values = vec![level; n];
        let result = hampel(&values, n + 10, 3.0).unwrap();
        prop_assert_eq!(&result.filtered_data, &values);
    }

    #[test]
    fn second_pass_keeps_isolated_spike_corrections(
        slope in 1i32..=5,
        window_size in 1usize..=4,
    ) {
        let mut values = ramp(50, 0, slope);
        for i in [10, 25, 40] {
            values[i] += 1000.0;
        }

        let first = hampel(&values, window_size, 3.0).unwrap();
        prop_assert_eq!(&first.outlier_indices, &vec![10usize, 25, 40]);

        let second = hampel(&first.filtered_data, window_size, 3.0).unwrap();
        prop_assert!(second.outlier_indices.iter().all(|i| first.is_outlier(*i)));
        prop_assert_eq!(&second.filtered_data, &first.filtered_data);
    }
}

#[test]
fn second_pass_over_worked_example_is_stable() {
    let data = [1.0, 2.0, 3.0, 100.0, 4.0, 5.0, 6.0];
    let first = hampel(&data, 3, 3.0).unwrap();
    let second = hampel(&first.filtered_data, 3, 3.0).unwrap();
    assert!(second.outlier_indices.is_empty());
    assert_eq!(second.filtered_data, first.filtered_data);
}

#[test]
fn raw_arguments_rejected_like_dynamic_callers() {
    let v = Validator;
    let series: Vec<RawParam> = [1, 2, 1, 1, 40, 2, 1, 1, 30, 40, 1, 1, 2, 1]
        .iter()
        .map(|&x| RawParam::Int(x))
        .collect();
    assert!(v.values(&series).is_ok());

    assert!(v.values(&[RawParam::from("a")]).unwrap_err().is_invalid_argument());
    assert!(v.window_size(&RawParam::Int(-1)).unwrap_err().is_invalid_argument());
    assert!(v.window_size(&RawParam::Int(0)).unwrap_err().is_invalid_argument());
    assert!(v.window_size(&RawParam::from("a")).unwrap_err().is_invalid_argument());
    assert!(v.n_sigma(&RawParam::Int(-1)).unwrap_err().is_invalid_argument());
    assert!(v.n_sigma(&RawParam::from("a")).unwrap_err().is_invalid_argument());
}

#[test]
fn spiked_fixture_flags_the_spikes() {
    let data = [1.0, 2.0, 1.0, 1.0, 40.0, 2.0, 1.0, 1.0, 30.0, 40.0, 1.0, 1.0, 2.0, 1.0];
    let result = hampel(&data, 3, 3.0).unwrap();
    for i in [4, 8, 9] {
        assert!(result.is_outlier(i), "index {i} not flagged");
    }
}
