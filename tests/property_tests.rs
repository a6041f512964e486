mod common;

use common::RENT_1BD;
use opportunity_mapper::config::WeightVector;
use opportunity_mapper::dataset::ZipRecord;
use opportunity_mapper::metrics::{Column, Metric, UnitSize};
use opportunity_mapper::normalize::normalize_column;
use opportunity_mapper::scorer::score_all;
use proptest::prelude::*;
use strum::IntoEnumIterator;

// --- STRATEGIES ---

fn scoring_columns() -> Vec<Column> {
    Metric::iter().map(|m| m.column(UnitSize::OneBedroom)).collect()
}

prop_compose! {
    fn arb_record(id: usize)(
        values in proptest::collection::vec(0.0..=1.0f64, 5)
    ) -> ZipRecord {
        scoring_columns()
            .into_iter()
            .zip(values)
            .fold(ZipRecord::new(format!("9{:04}", id)), |r, (c, v)| r.with_normalized(c, v))
    }
}

fn arb_records() -> impl Strategy<Value = Vec<ZipRecord>> {
    (1usize..40).prop_flat_map(|n| {
        (0..n).map(arb_record).collect::<Vec<_>>()
    })
}

prop_compose! {
    fn arb_weights()(
        rent in 0.0..10.0f64,
        crime_rate in 0.0..10.0f64,
        crime_trend in 0.0..10.0f64,
        transit_distance in 0.0..10.0f64,
        median_income in 0.0..10.0f64
    ) -> WeightVector {
        WeightVector { rent, crime_rate, crime_trend, transit_distance, median_income }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn test_scores_stay_in_unit_interval(records in arb_records(), weights in arb_weights()) {
        prop_assume!(weights.total() > 0.0);
        let ranked = score_all(&records, &weights).unwrap();
        prop_assert_eq!(ranked.len(), records.len());
        for s in &ranked {
            prop_assert!((0.0..=1.0).contains(&s.score), "score {} out of range", s.score);
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_power_of_two_scaling_keeps_ranking(
        records in arb_records(),
        weights in arb_weights(),
        factor in prop::sample::select(vec![0.125, 0.5, 2.0, 8.0, 1024.0])
    ) {
        prop_assume!(weights.total() > 0.0);
        let mut scaled = weights;
        for metric in Metric::iter() {
            scaled.set(metric, weights.get(metric) * factor);
        }
        let a = score_all(&records, &weights).unwrap();
        let b = score_all(&records, &scaled).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_any_positive_scaling_keeps_scores(
        records in arb_records(),
        weights in arb_weights(),
        factor in 0.01..100.0f64
    ) {
        prop_assume!(weights.total() > 0.0);
        let mut scaled = weights;
        for metric in Metric::iter() {
            scaled.set(metric, weights.get(metric) * factor);
        }
        let a = score_all(&records, &weights).unwrap();
        let b = score_all(&records, &scaled).unwrap();
        for s in &a {
            let other = b.iter().find(|o| o.zip_code == s.zip_code).unwrap();
            prop_assert!((s.score - other.score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_huge_weights_keep_scores_in_range(
        records in arb_records(),
        weights in arb_weights(),
        factor in 1e300..f64::MAX
    ) {
        prop_assume!(weights.total() > 0.0);
        let mut huge = weights;
        for metric in Metric::iter() {
            // Scale by the fraction of the largest weight, landing near f64::MAX.
            huge.set(metric, weights.get(metric) / 10.0 * factor);
        }
        let a = score_all(&records, &weights).unwrap();
        let b = score_all(&records, &huge).unwrap();
        prop_assert_eq!(a.len(), b.len());
        for s in &b {
            prop_assert!((0.0..=1.0).contains(&s.score), "score {} out of range", s.score);
            let base = a.iter().find(|o| o.zip_code == s.zip_code).unwrap();
            prop_assert!((s.score - base.score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_metric_reproduces_normalized_value(
        records in arb_records(),
        idx in 0usize..5,
        weight in 0.1..10.0f64
    ) {
        let metric = Metric::iter().nth(idx).unwrap();
        let mut weights = WeightVector::zeroed();
        weights.set(metric, weight);

        let column = metric.column(UnitSize::OneBedroom);
        for s in score_all(&records, &weights).unwrap() {
            let expected = records[s.index].normalized(column).unwrap();
            prop_assert!((s.score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalization_is_idempotent(
        mut values in proptest::collection::vec(0.0..=1.0f64, 0..50)
    ) {
        values.push(0.0);
        values.push(1.0);
        let column: Vec<Option<f64>> = values.into_iter().map(Some).collect();
        let once = normalize_column(Column::MedianIncome, &column).unwrap();
        prop_assert_eq!(&once, &column);
        let twice = normalize_column(Column::MedianIncome, &once).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_normalized_values_in_unit_interval(
        values in proptest::collection::vec(
            proptest::option::of(prop_oneof![-1e6..1e6f64, prop::num::f64::NORMAL]),
            2..60
        ),
        lower_is_better in any::<bool>()
    ) {
        let column = if lower_is_better { RENT_1BD } else { Column::MedianIncome };
        if let Ok(out) = normalize_column(column, &values) {
            for (v, n) in values.iter().zip(&out) {
                prop_assert_eq!(v.is_some(), n.is_some());
                if let Some(n) = n {
                    prop_assert!((0.0..=1.0).contains(n));
                }
            }
        }
    }
}
