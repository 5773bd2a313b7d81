//! Pearson correlation and its two-sided significance.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// p-values below this are flagged significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Fewest points for which a correlation is computed.
pub const MIN_CORRELATION_POINTS: usize = 3;

/// A correlation coefficient with its p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairCorrelation {
    pub correlation: f64,
    pub p_value: f64,
    pub significant: bool,
}

impl PairCorrelation {
    /// Reported when a correlation is undefined (too few points, zero variance).
    pub const UNDEFINED: PairCorrelation = PairCorrelation {
        correlation: 0.0,
        p_value: 1.0,
        significant: false,
    };

    pub fn new(correlation: f64, p_value: f64) -> PairCorrelation {
        PairCorrelation {
            correlation,
            p_value,
            significant: p_value < SIGNIFICANCE_LEVEL,
        }
    }
}

/// True when every value equals the first. Rounding in the mean can leave a
/// constant series with a tiny non-zero variance, so this is checked on the values.
fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Pearson's r, or None when it is undefined (length mismatch, fewer than two
/// points, a constant series, non-finite input).
pub fn pearson_r(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 || is_constant(x) || is_constant(y) {
        return None;
    }
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x > 0.0 && var_y > 0.0 {
        let r = cov / (var_x.sqrt() * var_y.sqrt());
        r.is_finite().then(|| r.clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// Two-sided p-value for a correlation `r` over `n` points, from Student's t with
/// `n - 2` degrees of freedom.
pub fn correlation_p_value(r: f64, n: usize) -> f64 {
    if n < MIN_CORRELATION_POINTS || !r.is_finite() {
        return 1.0;
    }
    let df = (n - 2) as f64;
    let denom = (1.0 - r) * (1.0 + r);
    if denom <= 0.0 {
        return 0.0;
    }
    let t = r * (df / denom).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

/// Pearson correlation with p-value. Undefined correlations resolve to
/// [`PairCorrelation::UNDEFINED`] rather than NaN.
pub fn pearson(x: &[f64], y: &[f64]) -> PairCorrelation {
    if x.len() != y.len() || x.len() < MIN_CORRELATION_POINTS {
        return PairCorrelation::UNDEFINED;
    }
    match pearson_r(x, y) {
        Some(r) => PairCorrelation::new(r, correlation_p_value(r, x.len())),
        None => PairCorrelation::UNDEFINED,
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to a fixed number of decimal places, for human-readable findings.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
