//! Lagged cross-correlation between two equal-length series.
//!
//! At lag `k` the first `n - k` points of series A are paired with the last
//! `n - k` points of series B, so a positive optimal lag means movements in A
//! precede matching movements in B by `k` steps.

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{AnalysisError, Result};
use crate::stats::{pearson, PairCorrelation, MIN_CORRELATION_POINTS};

/// Largest lag scanned when the caller does not choose one: two years of months.
pub const DEFAULT_MAX_LAG_MONTHS: usize = 24;

/// Qualitative bucket for the magnitude of a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationStrength {
    #[serde(rename = "very strong")]
    VeryStrong,
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "weak")]
    Weak,
    #[serde(rename = "very weak")]
    VeryWeak,
}

impl CorrelationStrength {
    /// Bucket `|correlation|`: ≥0.9, ≥0.7, ≥0.5, ≥0.3, else very weak.
    pub fn from_correlation(correlation: f64) -> CorrelationStrength {
        let magnitude = correlation.abs();
        if magnitude >= 0.9 {
            CorrelationStrength::VeryStrong
        } else if magnitude >= 0.7 {
            CorrelationStrength::Strong
        } else if magnitude >= 0.5 {
            CorrelationStrength::Moderate
        } else if magnitude >= 0.3 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::VeryWeak
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CorrelationStrength::VeryStrong => "very strong",
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::VeryWeak => "very weak",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of a lag scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagCorrelationResult {
    #[serde(rename = "optimal_lag_months")]
    pub optimal_lag: usize,
    pub max_correlation: f64,
    pub correlation_p_value: f64,
    #[serde(rename = "lag_correlation_series")]
    pub per_lag_series: BTreeMap<usize, PairCorrelation>,
    /// True when the optimal lag is non-zero, i.e. series A leads series B.
    pub lead_relationship: bool,
    pub correlation_strength: CorrelationStrength,
}

fn correlation_at_lag(a: &[f64], b: &[f64], lag: usize) -> PairCorrelation {
    let n = a.len();
    if lag == 0 {
        return pearson(a, b);
    }
    if lag >= n || n - lag < MIN_CORRELATION_POINTS {
        return PairCorrelation::UNDEFINED;
    }
    pearson(&a[..n - lag], &b[lag..])
}

/// Scan lags `0..=max_lag` and report the one with the largest absolute correlation.
///
/// Ties go to the smallest lag. Lags that leave fewer than three overlapping points
/// report correlation 0, p-value 1 instead of failing the scan.
pub fn compute_lag_correlation(
    series_a: &[f64],
    series_b: &[f64],
    max_lag: usize,
) -> Result<LagCorrelationResult> {
    if series_a.len() != series_b.len() {
        return Err(AnalysisError::LengthMismatch {
            left: series_a.len(),
            right: series_b.len(),
        });
    }
    if series_a.len() < MIN_CORRELATION_POINTS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_CORRELATION_POINTS,
            actual: series_a.len(),
        });
    }

    let mut per_lag_series = BTreeMap::new();
    let mut optimal_lag = 0;
    let mut best = PairCorrelation::UNDEFINED;
    let mut best_magnitude = f64::NEG_INFINITY;
    for lag in 0..=max_lag {
        let point = correlation_at_lag(series_a, series_b, lag);
        if point.correlation.abs() > best_magnitude {
            best_magnitude = point.correlation.abs();
            best = point;
            optimal_lag = lag;
        }
        per_lag_series.insert(lag, point);
    }
    debug!(
        "lag: scanned {} lags over {} points, optimal lag {} (r = {:.3})",
        max_lag + 1,
        series_a.len(),
        optimal_lag,
        best.correlation
    );

    Ok(LagCorrelationResult {
        optimal_lag,
        max_correlation: best.correlation,
        correlation_p_value: best.p_value,
        per_lag_series,
        lead_relationship: optimal_lag > 0,
        correlation_strength: CorrelationStrength::from_correlation(best.correlation),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A deterministic, non-periodic signal.
    fn signal(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let x = i as f64;
                (x * 0.37).sin() + 0.5 * (x * 0.11).cos() + 0.02 * x
            })
            .collect()
    }

    #[test]
    fn test_length_mismatch() {
        let err = compute_lag_correlation(&[1.0, 2.0, 3.0], &[1.0, 2.0], 2).unwrap_err();
        assert_eq!(err, AnalysisError::LengthMismatch { left: 3, right: 2 });
    }

    #[test]
    fn test_insufficient_data() {
        let err = compute_lag_correlation(&[1.0, 2.0], &[2.0, 1.0], 1).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                required: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_recovers_known_shift() {
        let k = 4;
        let a = signal(60);
        // b[i] = a[i - k]: a leads b by k steps
        let b: Vec<f64> = (0..a.len())
            .map(|i| if i >= k { a[i - k] } else { 0.0 })
            .collect();
        let result = compute_lag_correlation(&a, &b, 12).unwrap();
        assert_eq!(result.optimal_lag, k);
        assert!((result.max_correlation - 1.0).abs() < 1e-9);
        assert!(result.lead_relationship);
        assert_eq!(result.correlation_strength, CorrelationStrength::VeryStrong);
        assert!(result.per_lag_series[&k].significant);
    }

    #[test]
    fn test_zero_lag_for_identical_series() {
        let a = signal(30);
        let result = compute_lag_correlation(&a, &a, 6).unwrap();
        assert_eq!(result.optimal_lag, 0);
        assert!(!result.lead_relationship);
        assert_eq!(result.per_lag_series.len(), 7);
    }

    #[test]
    fn test_constant_series_resolve_to_zero() {
        let a = vec![5.0; 12];
        let result = compute_lag_correlation(&a, &a, 6).unwrap();
        for point in result.per_lag_series.values() {
            assert_eq!(point.correlation, 0.0);
            assert_eq!(point.p_value, 1.0);
            assert!(!point.significant);
        }
        assert_eq!(result.optimal_lag, 0);
        assert_eq!(result.correlation_strength, CorrelationStrength::VeryWeak);
    }

    #[test]
    fn test_inexact_constant_series_resolve_to_zero() {
        for c in [0.1, 15.2, 421.78, -30.3] {
            let a = vec![c; 12];
            let result = compute_lag_correlation(&a, &a, 6).unwrap();
            for (lag, point) in &result.per_lag_series {
                assert_eq!(*point, PairCorrelation::UNDEFINED, "c = {c}, lag = {lag}");
            }
            assert_eq!(result.max_correlation, 0.0);
            assert_eq!(result.optimal_lag, 0);
            assert_eq!(result.correlation_strength, CorrelationStrength::VeryWeak);
        }
    }

    #[test]
    fn test_shrunk_lags_use_sentinel() {
        let a = signal(5);
        let b: Vec<f64> = a.iter().map(|v| v * 2.0).collect();
        let result = compute_lag_correlation(&a, &b, 8).unwrap();
        // lags 3..=8 leave fewer than three overlapping points
        for lag in 3..=8 {
            assert_eq!(result.per_lag_series[&lag], PairCorrelation::UNDEFINED);
        }
        assert_eq!(result.optimal_lag, 0);
    }

    #[test]
    fn test_negative_correlation_selected_by_magnitude() {
        let a = signal(40);
        let b: Vec<f64> = a.iter().map(|v| -v).collect();
        let result = compute_lag_correlation(&a, &b, 3).unwrap();
        assert_eq!(result.optimal_lag, 0);
        assert!((result.max_correlation + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_strength_buckets() {
        let cases = [
            (0.95, CorrelationStrength::VeryStrong),
            (0.75, CorrelationStrength::Strong),
            (0.55, CorrelationStrength::Moderate),
            (0.35, CorrelationStrength::Weak),
            (0.1, CorrelationStrength::VeryWeak),
            (-0.95, CorrelationStrength::VeryStrong),
            (0.9, CorrelationStrength::VeryStrong),
            (0.3, CorrelationStrength::Weak),
        ];
        for (correlation, expected) in cases {
            assert_eq!(CorrelationStrength::from_correlation(correlation), expected);
        }
        assert_eq!(CorrelationStrength::VeryWeak.to_string(), "very weak");
    }

    #[test]
    fn test_serialized_field_names() {
        let a = signal(10);
        let json = serde_json::to_value(compute_lag_correlation(&a, &a, 2).unwrap()).unwrap();
        assert_eq!(json["optimal_lag_months"], 0);
        assert_eq!(json["correlation_strength"], "very strong");
        assert!(json["lag_correlation_series"]["2"].is_object());
    }
}
