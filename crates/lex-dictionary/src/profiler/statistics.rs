//! Statistical functions for column summaries.

use polars::prelude::*;
use std::collections::HashMap;

use crate::error::Result;
use crate::types::{CategoricalStats, NumericStats};
use crate::utils::collect_text_values;

/// Non-missing values of a numeric column as `f64` (nulls and NaN dropped).
pub(crate) fn numeric_values(series: &Series) -> Result<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Compute mean, sample std, min, quartiles and max of a numeric column.
pub(crate) fn numeric_stats(series: &Series) -> Result<NumericStats> {
    let mut values = numeric_values(series)?;
    if values.is_empty() {
        return Ok(NumericStats::default());
    }

    values.sort_by(f64::total_cmp);

    Ok(NumericStats {
        mean: Some(calculate_mean(&values)),
        std: calculate_std(&values),
        min: values.first().copied(),
        q25: quantile_sorted(&values, 0.25),
        median: quantile_sorted(&values, 0.5),
        q75: quantile_sorted(&values, 0.75),
        max: values.last().copied(),
    })
}

/// Compute distinct count, most frequent value and its frequency.
///
/// Ties on frequency go to the value seen first.
pub(crate) fn categorical_stats(series: &Series) -> Result<CategoricalStats> {
    let values = collect_text_values(series)?;

    // value -> (count, first index)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.iter().enumerate() {
        counts.entry(value.as_str()).or_insert((0, idx)).0 += 1;
    }

    let top = counts
        .iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, (count, _))| (value.to_string(), *count));

    Ok(CategoricalStats {
        unique: counts.len(),
        top: top.as_ref().map(|(value, _)| value.clone()),
        freq: top.map(|(_, count)| count),
    })
}

pub(crate) fn calculate_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1). `None` with fewer than two values.
pub(crate) fn calculate_std(values: &[f64]) -> Option<f64> {
    let n = values.len() as f64;
    if n <= 1.0 {
        return None;
    }

    let mean = calculate_mean(values);
    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt())
}

/// Quantile of sorted data with linear interpolation between closest ranks.
///
/// `h = (n - 1) * p`, result `x[j] + (h - j) * (x[j + 1] - x[j])` with
/// `j = floor(h)`.
pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted[n - 1])
    } else {
        Some(sorted[j] + g * (sorted[j + 1] - sorted[j]))
    }
}

/// Percentage of missing cells, 0.0 when the dataset has no rows.
pub(crate) fn missing_percentage(missing: usize, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        100.0 * missing as f64 / rows as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== calculate_std tests ====================

    #[test]
    fn test_calculate_std_basic() {
        // Values: 1, 2, 3, 4, 5
        // Mean = 3, Variance = 10 / 4 = 2.5, Std = sqrt(2.5) ~ 1.58
        let std = calculate_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((std - 1.5811).abs() < 1e-4);
    }

    #[test]
    fn test_calculate_std_single_value() {
        assert_eq!(calculate_std(&[5.0]), None);
    }

    #[test]
    fn test_calculate_std_identical_values() {
        assert_eq!(calculate_std(&[5.0, 5.0, 5.0, 5.0]), Some(0.0));
    }

    #[test]
    fn test_calculate_std_empty() {
        assert_eq!(calculate_std(&[]), None);
    }

    // ==================== quantile tests ====================

    #[test]
    fn test_quantile_extremes_and_median() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&data, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&data, 1.0), Some(5.0));
        assert_eq!(quantile_sorted(&data, 0.5), Some(3.0));
        assert_eq!(quantile_sorted(&data, 0.25), Some(2.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        // h = 3 * 0.25 = 0.75 -> 1 + 0.75 * (2 - 1)
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0], 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&[1.0, 3.0], 0.75), Some(2.5));
    }

    #[test]
    fn test_quantile_invalid_input() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[1.0], 1.5), None);
        assert_eq!(quantile_sorted(&[7.0], 0.3), Some(7.0));
    }

    // ==================== numeric_stats tests ====================

    #[test]
    fn test_numeric_stats_skips_nulls() {
        let series = Series::new("colA".into(), &[Some(1i64), None, Some(3)]);
        let stats = numeric_stats(&series).unwrap();

        assert_eq!(stats.mean, Some(2.0));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.q25, Some(1.5));
        assert_eq!(stats.median, Some(2.0));
        assert_eq!(stats.q75, Some(2.5));
        assert_eq!(stats.max, Some(3.0));
        assert!((stats.std.unwrap() - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_stats_skips_nan() {
        let series = Series::new("f".into(), &[Some(f64::NAN), Some(4.0), Some(2.0)]);
        let stats = numeric_stats(&series).unwrap();
        assert_eq!(stats.mean, Some(3.0));
        assert_eq!(stats.min, Some(2.0));
    }

    #[test]
    fn test_numeric_stats_all_null() {
        let series = Series::new("empty".into(), &[None::<f64>, None]);
        assert_eq!(numeric_stats(&series).unwrap(), NumericStats::default());
    }

    // ==================== categorical_stats tests ====================

    #[test]
    fn test_categorical_stats() {
        let series = Series::new("colB".into(), &["x", "y", "x"]);
        let stats = categorical_stats(&series).unwrap();

        assert_eq!(stats.unique, 2);
        assert_eq!(stats.top.as_deref(), Some("x"));
        assert_eq!(stats.freq, Some(2));
    }

    #[test]
    fn test_categorical_tie_goes_to_first_seen() {
        let series = Series::new("c".into(), &["b", "a", "a", "b", "c"]);
        let stats = categorical_stats(&series).unwrap();
        assert_eq!(stats.top.as_deref(), Some("b"));
        assert_eq!(stats.freq, Some(2));
    }

    #[test]
    fn test_categorical_ignores_nulls() {
        let series = Series::new("c".into(), &[None, Some("a"), None]);
        let stats = categorical_stats(&series).unwrap();
        assert_eq!(stats.unique, 1);
        assert_eq!(stats.freq, Some(1));
    }

    #[test]
    fn test_categorical_all_null() {
        let series = Series::new("c".into(), &[None::<&str>, None]);
        let stats = categorical_stats(&series).unwrap();
        assert_eq!(stats, CategoricalStats::default());
    }

    #[test]
    fn test_categorical_boolean_column() {
        let series = Series::new("flag".into(), &[true, true, false]);
        let stats = categorical_stats(&series).unwrap();
        assert_eq!(stats.top.as_deref(), Some("true"));
        assert_eq!(stats.unique, 2);
    }

    // ==================== missing_percentage tests ====================

    #[test]
    fn test_missing_percentage() {
        assert!((missing_percentage(1, 3) - 33.333_333).abs() < 1e-4);
        assert_eq!(missing_percentage(0, 3), 0.0);
        assert_eq!(missing_percentage(4, 4), 100.0);
    }

    #[test]
    fn test_missing_percentage_zero_rows() {
        assert_eq!(missing_percentage(0, 0), 0.0);
    }
}
