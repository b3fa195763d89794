//! Property tests for histogram bucketing.

use income_analysis::{Histogram, MAX_BINS, MIN_BINS, describe};
use income_ingest::{Column, ColumnData};
use proptest::prelude::*;

proptest! {
    #[test]
    fn buckets_account_for_every_value(
        values in prop::collection::vec(-1.0e9f64..1.0e9, 1..200),
        bins in MIN_BINS..=MAX_BINS,
    ) {
        let histogram = Histogram::compute("x", &values, bins).unwrap();
        let counted: usize = histogram.buckets.iter().map(|b| b.count).sum();
        prop_assert_eq!(counted, values.len());
        prop_assert_eq!(histogram.total, values.len());
        prop_assert_eq!(histogram.buckets.len(), bins);
    }

    #[test]
    fn buckets_are_contiguous(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 2..50),
        bins in MIN_BINS..=MAX_BINS,
    ) {
        let histogram = Histogram::compute("x", &values, bins).unwrap();
        for pair in histogram.buckets.windows(2) {
            prop_assert!(pair[0].upper <= pair[1].lower + 1e-6);
            prop_assert!(pair[0].lower < pair[0].upper);
        }
    }

    #[test]
    fn summary_statistics_are_ordered(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..100),
    ) {
        let column = Column::new("x", ColumnData::Float(values.iter().copied().map(Some).collect()));
        let summary = describe(&column).unwrap();
        let ordered = [
            summary.min.unwrap(),
            summary.q25.unwrap(),
            summary.median.unwrap(),
            summary.q75.unwrap(),
            summary.max.unwrap(),
        ];
        for pair in ordered.windows(2) {
            prop_assert!(pair[0] <= pair[1] + 1e-6);
        }
        prop_assert_eq!(summary.count, values.len());
    }

    #[test]
    fn wide_ranges_keep_finite_buckets(
        low in -1.0e308f64..-1.0e307,
        high in 1.0e307f64..1.0e308,
        bins in MIN_BINS..=MAX_BINS,
    ) {
        let histogram = Histogram::compute("x", &[low, 0.0, high], bins).unwrap();
        let counted: usize = histogram.buckets.iter().map(|b| b.count).sum();
        prop_assert_eq!(counted, 3);
        prop_assert!(histogram.buckets.iter().all(|b| b.lower.is_finite() && b.upper.is_finite()));
    }
}
