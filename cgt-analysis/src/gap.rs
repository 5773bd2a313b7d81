//! CO2 gap model: how much observed warming the logarithmic CO2 relation leaves
//! unexplained.
//!
//! `theoretical_warming = sensitivity * log2(co2 / baseline_co2)` is added to the
//! baseline temperature and compared to the observed temperature.

use cgt_core::month_key::MonthKey;
use cgt_core::observation::{Co2Reading, TemperatureReading, GLOBAL_BASELINE_TEMP};
use log::{debug, info};
use serde::Serialize;

use crate::align::inner_join;
use crate::error::{AnalysisError, Result};

/// CO2 concentration at the start of the Mauna Loa record (1958), in ppm.
pub const DEFAULT_BASELINE_CO2: f64 = 315.0;

/// Warming per doubling of CO2, in °C.
pub const DEFAULT_SENSITIVITY: f64 = 2.0;

/// Low and high climate sensitivity used for the uncertainty range, in °C per doubling.
pub const DEFAULT_SENSITIVITY_RANGE: (f64, f64) = (1.5, 3.0);

/// Fixed p-value attached to every point of a gap series.
///
/// This is a placeholder, not the outcome of a per-point test.
pub const PLACEHOLDER_GAP_P_VALUE: f64 = 0.001;

/// Half-width of the fixed interval placed around each gap, in °C. Not a
/// statistical confidence interval.
pub const PLACEHOLDER_GAP_HALF_WIDTH: f64 = 0.2;

/// Parameters of the gap model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapModelConfig {
    pub baseline_temp: f64,
    pub baseline_co2: f64,
    pub sensitivity: f64,
    pub sensitivity_range: (f64, f64),
}

impl Default for GapModelConfig {
    fn default() -> Self {
        GapModelConfig {
            baseline_temp: GLOBAL_BASELINE_TEMP,
            baseline_co2: DEFAULT_BASELINE_CO2,
            sensitivity: DEFAULT_SENSITIVITY,
            sensitivity_range: DEFAULT_SENSITIVITY_RANGE,
        }
    }
}

/// Theoretical vs observed temperature for one CO2 concentration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapResult {
    pub co2_ppm: f64,
    pub theoretical_temp: f64,
    pub theoretical_warming: f64,
    pub actual_temp: f64,
    /// `actual_temp - theoretical_temp`
    pub unexplained_gap: f64,
    /// Gap as a percentage of the observed warming; 0 when no warming was observed.
    pub gap_percentage: f64,
    pub uncertainty_range: (f64, f64),
}

/// Compare an observed temperature with the temperature CO2 alone would predict.
///
/// Fails with [`AnalysisError::InvalidInput`] for a non-positive (or NaN) CO2
/// concentration or baseline, where the logarithm is undefined.
pub fn compute_gap(co2_ppm: f64, actual_temp: f64, config: &GapModelConfig) -> Result<GapResult> {
    if !(co2_ppm > 0.0) {
        return Err(AnalysisError::InvalidInput(format!(
            "CO2 concentration must be positive, got {}",
            co2_ppm
        )));
    }
    if !(config.baseline_co2 > 0.0) {
        return Err(AnalysisError::InvalidInput(format!(
            "baseline CO2 must be positive, got {}",
            config.baseline_co2
        )));
    }

    let warming_factor = (co2_ppm / config.baseline_co2).log2();
    let theoretical_warming = config.sensitivity * warming_factor;
    let theoretical_temp = config.baseline_temp + theoretical_warming;

    let unexplained_gap = actual_temp - theoretical_temp;
    let actual_warming = actual_temp - config.baseline_temp;
    let gap_percentage = if actual_warming != 0.0 {
        unexplained_gap / actual_warming * 100.0
    } else {
        0.0
    };

    let (low, high) = config.sensitivity_range;
    let uncertainty_range = (
        config.baseline_temp + low * warming_factor,
        config.baseline_temp + high * warming_factor,
    );

    Ok(GapResult {
        co2_ppm,
        theoretical_temp,
        theoretical_warming,
        actual_temp,
        unexplained_gap,
        gap_percentage,
        uncertainty_range,
    })
}

/// One month of a gap series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapPoint {
    pub month: MonthKey,
    #[serde(flatten)]
    pub gap: GapResult,
    /// Always [`PLACEHOLDER_GAP_P_VALUE`].
    pub p_value: f64,
    /// `gap ± PLACEHOLDER_GAP_HALF_WIDTH`
    pub confidence_interval: (f64, f64),
}

impl GapPoint {
    fn new(month: MonthKey, gap: GapResult) -> GapPoint {
        GapPoint {
            month,
            gap,
            p_value: PLACEHOLDER_GAP_P_VALUE,
            confidence_interval: (
                gap.unexplained_gap - PLACEHOLDER_GAP_HALF_WIDTH,
                gap.unexplained_gap + PLACEHOLDER_GAP_HALF_WIDTH,
            ),
        }
    }
}

/// Run the gap model for every calendar month present in both series.
///
/// Dates are truncated to their month before joining; output is chronological.
pub fn analyze_gap_series(
    co2_series: &[Co2Reading],
    temp_series: &[TemperatureReading],
    region: &str,
    config: &GapModelConfig,
) -> Result<Vec<GapPoint>> {
    let matched = inner_join(co2_series, temp_series);
    info!(
        "gap: {} of {} CO2 months matched temperature for {}",
        matched.len(),
        co2_series.len(),
        region
    );

    let points = matched
        .into_iter()
        .map(|(month, co2, temp)| {
            compute_gap(co2.ppm, temp.temperature_celsius, config).map(|gap| GapPoint::new(month, gap))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("gap: produced {} points for {}", points.len(), region);
    Ok(points)
}
