//! Groundwater/temperature lag analysis on month-aligned series, and the rows of
//! the time-lag chart built from it.

use cgt_core::month_key::MonthKey;
use cgt_core::observation::{GroundwaterReading, TemperatureReading};
use log::info;
use serde::Serialize;

use crate::align::inner_join;
use crate::error::{AnalysisError, Result};
use crate::lag::{compute_lag_correlation, CorrelationStrength, LagCorrelationResult};
use crate::summary::Period;

/// Overlapping months needed before a groundwater/temperature lag scan is attempted.
pub const MIN_OVERLAPPING_MONTHS: usize = 12;

/// Rows shown in the data preview.
pub const PREVIEW_ROWS: usize = 5;

/// Groundwater levels and temperature anomalies over their common months.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedSeries {
    pub months: Vec<MonthKey>,
    pub groundwater_levels: Vec<f64>,
    pub temperature_anomalies: Vec<f64>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    fn period(&self) -> Option<Period> {
        Some(Period {
            start: *self.months.first()?,
            end: *self.months.last()?,
            data_points: self.len(),
        })
    }

    fn preview(&self) -> AlignedSeries {
        AlignedSeries {
            months: self.months.iter().take(PREVIEW_ROWS).copied().collect(),
            groundwater_levels: self.groundwater_levels.iter().take(PREVIEW_ROWS).copied().collect(),
            temperature_anomalies: self
                .temperature_anomalies
                .iter()
                .take(PREVIEW_ROWS)
                .copied()
                .collect(),
        }
    }
}

/// Join groundwater levels with temperature anomalies on calendar month.
///
/// Readings without an anomaly fall back to `celsius - 14.0`. Fails with
/// [`AnalysisError::InsufficientData`] below [`MIN_OVERLAPPING_MONTHS`] common months.
pub fn align_groundwater_temperature(
    groundwater: &[GroundwaterReading],
    temperatures: &[TemperatureReading],
) -> Result<AlignedSeries> {
    let joined = inner_join(groundwater, temperatures);
    if joined.len() < MIN_OVERLAPPING_MONTHS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_OVERLAPPING_MONTHS,
            actual: joined.len(),
        });
    }

    let mut aligned = AlignedSeries {
        months: Vec::with_capacity(joined.len()),
        groundwater_levels: Vec::with_capacity(joined.len()),
        temperature_anomalies: Vec::with_capacity(joined.len()),
    };
    for (month, gw, temp) in joined {
        aligned.months.push(month);
        aligned.groundwater_levels.push(gw.water_level_m);
        aligned.temperature_anomalies.push(temp.anomaly_or_derived());
    }
    Ok(aligned)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundwaterTemperatureAnalysis {
    pub location: String,
    pub period: Period,
    pub correlation_analysis: LagCorrelationResult,
    pub data_preview: AlignedSeries,
}

/// Lag scan of groundwater level against temperature anomaly.
pub fn analyze_groundwater_temperature(
    location: &str,
    aligned: &AlignedSeries,
    max_lag: usize,
) -> Result<GroundwaterTemperatureAnalysis> {
    let period = aligned.period().ok_or(AnalysisError::InsufficientData {
        required: MIN_OVERLAPPING_MONTHS,
        actual: 0,
    })?;
    let correlation_analysis = compute_lag_correlation(
        &aligned.groundwater_levels,
        &aligned.temperature_anomalies,
        max_lag,
    )?;
    info!(
        "{}: {} aligned months {}..{}, optimal lag {}",
        location, period.data_points, period.start, period.end, correlation_analysis.optimal_lag
    );

    Ok(GroundwaterTemperatureAnalysis {
        location: location.to_string(),
        period,
        correlation_analysis,
        data_preview: aligned.preview(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub date: MonthKey,
    pub groundwater_level: f64,
    pub current_temperature: f64,
    /// Anomaly `optimal_lag` months later, if inside the series.
    pub lagged_temperature: Option<f64>,
    /// Level relative to the first aligned month.
    pub water_level_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSummary {
    pub finding: String,
    pub correlation_strength: CorrelationStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeLagChart {
    pub location: String,
    pub optimal_lag_months: usize,
    pub correlation_coefficient: f64,
    pub chart_data: Vec<ChartRow>,
    pub summary: ChartSummary,
}

/// Chart rows pairing each month's anomaly with the one `optimal_lag` months later.
///
/// Rows stop at the shortest of the three aligned vectors.
pub fn time_lag_chart(
    location: &str,
    aligned: &AlignedSeries,
    correlation: &LagCorrelationResult,
) -> TimeLagChart {
    let lag = correlation.optimal_lag;
    let baseline = aligned.groundwater_levels.first().copied().unwrap_or_default();

    let chart_data = aligned
        .months
        .iter()
        .zip(&aligned.groundwater_levels)
        .zip(&aligned.temperature_anomalies)
        .enumerate()
        .map(|(i, ((month, level), anomaly))| ChartRow {
            date: *month,
            groundwater_level: *level,
            current_temperature: *anomaly,
            lagged_temperature: aligned.temperature_anomalies.get(i + lag).copied(),
            water_level_change: level - baseline,
        })
        .collect();

    TimeLagChart {
        location: location.to_string(),
        optimal_lag_months: lag,
        correlation_coefficient: correlation.max_correlation,
        chart_data,
        summary: ChartSummary {
            finding: format!("Groundwater changes lead temperature changes by {} months", lag),
            correlation_strength: correlation.correlation_strength,
        },
    }
}
