use serde::Serialize;
use std::fmt;

use crate::stats::{correlation_p_value, mean};

/// Direction of a fitted trend.
///
/// A slope of exactly zero reports `Decreasing`; only a strictly positive slope
/// is `Increasing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    #[serde(rename = "increasing")]
    Increasing,
    #[serde(rename = "decreasing")]
    Decreasing,
    #[serde(rename = "insufficient data")]
    InsufficientData,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> TrendDirection {
        if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::InsufficientData => write!(f, "insufficient data"),
        }
    }
}

/// Least-squares line through a sequence indexed `0..n-1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub p_value: f64,
    #[serde(rename = "trend")]
    pub direction: TrendDirection,
    /// Same as `slope`; series are monthly so one index step is one month.
    pub monthly_change: f64,
}

impl TrendResult {
    /// Result reported for fewer than two points.
    pub fn insufficient() -> TrendResult {
        TrendResult {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            p_value: 1.0,
            direction: TrendDirection::InsufficientData,
            monthly_change: 0.0,
        }
    }

    /// Slope scaled from per-month to per-year.
    pub fn annual_change(&self) -> f64 {
        self.monthly_change * 12.0
    }
}

/// Fit an ordinary least-squares trend of `values` against their index.
///
/// Fewer than two values yield [`TrendResult::insufficient`] rather than an error.
pub fn fit_trend(values: &[f64]) -> TrendResult {
    let n = values.len();
    if n < 2 {
        return TrendResult::insufficient();
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let r = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };

    // two points always fit exactly; there are no residual degrees of freedom
    let p_value = if n == 2 {
        if syy == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        correlation_p_value(r, n)
    };

    TrendResult {
        slope,
        intercept,
        r_squared: r * r,
        p_value,
        direction: TrendDirection::from_slope(slope),
        monthly_change: slope,
    }
}
