//! Statistics Calculator Module
//! Summary metrics for the dashboard and `describe()`-style column statistics.

use crate::data::Dataset;
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::{HashMap, HashSet};

/// Headline numbers for the current filtered dataset.
///
/// Means are `None` when the column has no values in the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub record_count: usize,
    pub mean_drainage_area: Option<f64>,
    pub mean_datum_of_gage: Option<f64>,
    pub hydrologic_units: usize,
    pub streamgages: usize,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Occurrences of one distinct value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute the dashboard metrics for a dataset.
    pub fn compute_metrics(dataset: &Dataset) -> Metrics {
        let drainage: Vec<f64> = dataset.iter().filter_map(|r| r.drainage_area).collect();
        let datum: Vec<f64> = dataset.iter().filter_map(|r| r.datum_of_gage).collect();

        Metrics {
            record_count: dataset.len(),
            mean_drainage_area: Self::mean(&drainage).map(Self::round2),
            mean_datum_of_gage: Self::mean(&datum).map(Self::round2),
            hydrologic_units: Self::distinct(dataset.iter().map(|r| r.hydrologic_unit.as_deref())),
            streamgages: Self::distinct(dataset.iter().map(|r| r.location_id.as_deref())),
        }
    }

    /// Arithmetic mean, summed in sorted order so record order never changes the result.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let sorted = Self::sorted(values);
        Some(sorted.iter().mean())
    }

    /// Round to two decimals, ties to even.
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round_ties_even() / 100.0
    }

    fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> usize {
        values.flatten().collect::<HashSet<_>>().len()
    }

    pub fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }

    /// Quantile `q` (0..=1) of sorted values using linear interpolation (NumPy compatible).
    pub fn quantile(sorted_values: &[f64], q: f64) -> Option<f64> {
        let n = sorted_values.len();
        if n == 0 {
            return None;
        }
        if n == 1 {
            return Some(sorted_values[0]);
        }

        let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            Some(sorted_values[lower])
        } else {
            Some(sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac)
        }
    }

    /// Descriptive statistics for an array of values; `None` when empty.
    pub fn describe_values(column: &str, values: &[f64]) -> Option<ColumnSummary> {
        let sorted = Self::sorted(values);
        let n = sorted.len();
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let std = if n > 1 {
            Some(sorted.iter().std_dev())
        } else {
            None
        };

        Some(ColumnSummary {
            column: column.to_string(),
            count: n,
            mean: sorted.iter().mean(),
            std,
            min,
            p25: Self::quantile(&sorted, 0.25)?,
            p50: Self::quantile(&sorted, 0.50)?,
            p75: Self::quantile(&sorted, 0.75)?,
            max,
        })
    }

    /// Statistics for every numeric column of `df`.
    ///
    /// A text column counts as numeric only when every non-null cell parses.
    pub fn describe(df: &DataFrame) -> Vec<ColumnSummary> {
        df.get_columns()
            .iter()
            .filter_map(|col| {
                let numbers = col.cast(&DataType::Float64).ok()?;
                if numbers.null_count() > col.null_count() {
                    return None;
                }
                let values: Vec<f64> = numbers
                    .f64()
                    .ok()?
                    .into_iter()
                    .flatten()
                    .filter(|v| !v.is_nan())
                    .collect();
                Self::describe_values(col.name().as_str(), &values)
            })
            .collect()
    }

    /// Value counts for a column, most frequent first, nulls dropped.
    pub fn value_counts(df: &DataFrame, column: &str) -> Vec<ValueCount> {
        let Some(series) = df
            .column(column)
            .ok()
            .and_then(|col| col.cast(&DataType::String).ok())
        else {
            return Vec::new();
        };
        let Ok(values) = series.str() else {
            return Vec::new();
        };

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in values.into_iter().flatten() {
            *counts.entry(value).or_default() += 1;
        }

        let mut counts: Vec<ValueCount> = counts
            .into_iter()
            .map(|(value, count)| ValueCount {
                value: value.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn gage(drainage: Option<f64>, datum: Option<f64>, huc: &str, id: &str) -> Record {
        Record {
            county: Some("Peoria".to_string()),
            name: id.to_string(),
            drainage_area: drainage,
            datum_of_gage: datum,
            hydrologic_unit: Some(huc.to_string()),
            location_id: Some(id.to_string()),
        }
    }

    #[test]
    fn metrics_over_sample() {
        let dataset = Dataset::new(vec![
            gage(Some(10.0), Some(400.123), "07130003", "1"),
            gage(Some(20.0), Some(500.0), "07130003", "2"),
            gage(None, Some(600.0), "07130004", "2"),
        ]);

        let metrics = StatsCalculator::compute_metrics(&dataset);

        assert_eq!(metrics.record_count, 3);
        assert_eq!(metrics.mean_drainage_area, Some(15.0));
        assert_eq!(metrics.mean_datum_of_gage, Some(500.04));
        assert_eq!(metrics.hydrologic_units, 2);
        assert_eq!(metrics.streamgages, 2);
    }

    #[test]
    fn metrics_of_empty_dataset_have_no_means() {
        let metrics = StatsCalculator::compute_metrics(&Dataset::default());
        assert_eq!(metrics.record_count, 0);
        assert_eq!(metrics.mean_drainage_area, None);
        assert_eq!(metrics.mean_datum_of_gage, None);
        assert_eq!(metrics.hydrologic_units, 0);
        assert_eq!(metrics.streamgages, 0);
    }

    #[test]
    fn mean_is_permutation_invariant() {
        let values = [0.1, 1e9, 0.2, -1e9, 0.3, 7.77, 123.456];
        let mut reversed = values;
        reversed.reverse();
        let mut rotated = values;
        rotated.rotate_left(3);

        let expected = StatsCalculator::mean(&values);
        assert_eq!(StatsCalculator::mean(&reversed), expected);
        assert_eq!(StatsCalculator::mean(&rotated), expected);
    }

    #[test]
    fn round2_ties_to_even() {
        assert_eq!(StatsCalculator::round2(100.125), 100.12);
        assert_eq!(StatsCalculator::round2(0.375), 0.38);
        assert_eq!(StatsCalculator::round2(-0.125), -0.12);
        assert_eq!(StatsCalculator::round2(2.345_000_1), 2.35);
        assert_eq!(StatsCalculator::round2(3.0), 3.0);
    }

    #[test]
    fn tied_mean_rounds_to_even() {
        let dataset = Dataset::new(vec![
            gage(None, Some(100.25), "1", "a"),
            gage(None, Some(100.0), "1", "b"),
        ]);
        let metrics = StatsCalculator::compute_metrics(&dataset);
        assert_eq!(metrics.mean_datum_of_gage, Some(100.12));
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(StatsCalculator::quantile(&sorted, 0.25), Some(17.5));
        assert_eq!(StatsCalculator::quantile(&sorted, 0.5), Some(25.0));
        assert_eq!(StatsCalculator::quantile(&sorted, 0.75), Some(32.5));
        assert_eq!(StatsCalculator::quantile(&sorted, 0.0), Some(10.0));
        assert_eq!(StatsCalculator::quantile(&sorted, 1.0), Some(40.0));
        assert_eq!(StatsCalculator::quantile(&[], 0.5), None);
        assert_eq!(StatsCalculator::quantile(&[7.0], 0.25), Some(7.0));
    }

    #[test]
    fn describe_matches_pandas() {
        let df = df!(
            "name" => ["a", "b", "c", "d"],
            "drainage_area" => ["1", "2", "3", "4"]
        )
        .unwrap();

        let summary = StatsCalculator::describe(&df);
        assert_eq!(summary.len(), 1);

        let s = &summary[0];
        assert_eq!(s.column, "drainage_area");
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert!((s.std.unwrap() - 1.290_994_448_7).abs() < 1e-9);
        assert_eq!((s.min, s.p25, s.p50, s.p75, s.max), (1.0, 1.75, 2.5, 3.25, 4.0));
    }

    #[test]
    fn describe_skips_mixed_text_columns() {
        let df = df!(
            "name" => ["a", "b", "123"],
            "v" => [Some("1"), None, Some("3")]
        )
        .unwrap();

        let summary = StatsCalculator::describe(&df);
        let columns: Vec<&str> = summary.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(columns, vec!["v"]);
        assert_eq!(summary[0].count, 2);
    }

    #[test]
    fn single_value_has_no_std() {
        let s = StatsCalculator::describe_values("x", &[5.0]).unwrap();
        assert_eq!(s.std, None);
        assert_eq!(s.p25, 5.0);
        assert!(StatsCalculator::describe_values("x", &[]).is_none());
    }

    #[test]
    fn value_counts_sorted_by_frequency_then_value() {
        let df = df!("state" => [Some("IL"), Some("IA"), Some("IL"), None, Some("MO"), Some("IA")])
            .unwrap();

        let counts = StatsCalculator::value_counts(&df, "state");
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.value.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("IA", 2), ("IL", 2), ("MO", 1)]);
        assert!(StatsCalculator::value_counts(&df, "missing").is_empty());
    }
}
