//! Composite report: trends, CO2/temperature correlation, groundwater lag impact
//! and the rule-based findings drawn from them.

use cgt_core::observation::{values, Co2Reading, GroundwaterReading, TemperatureReading};
use log::{debug, warn};
use serde::Serialize;

use crate::gap::GapPoint;
use crate::lag::{compute_lag_correlation, LagCorrelationResult, DEFAULT_MAX_LAG_MONTHS};
use crate::stats::{mean, pearson, PairCorrelation, MIN_CORRELATION_POINTS};
use crate::trend::{fit_trend, TrendResult};

/// CO2/temperature correlation above which a finding is reported.
pub const STRONG_CO2_CORRELATION: f64 = 0.7;

/// Groundwater/temperature correlation below which a finding is reported.
pub const GROUNDWATER_FINDING_THRESHOLD: f64 = -0.5;

/// Gap series condensed for the composite report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapAggregate {
    pub mean_unexplained_warming: f64,
    pub max_unexplained_warming: f64,
    /// Mean gap percentage over the series.
    pub percentage_unexplained: f64,
}

/// Condense a gap series; `None` when it is empty.
pub fn aggregate_gaps(points: &[GapPoint]) -> Option<GapAggregate> {
    if points.is_empty() {
        return None;
    }
    let gaps: Vec<f64> = points.iter().map(|p| p.gap.unexplained_gap).collect();
    let percentages: Vec<f64> = points.iter().map(|p| p.gap.gap_percentage).collect();
    Some(GapAggregate {
        mean_unexplained_warming: mean(&gaps),
        max_unexplained_warming: gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        percentage_unexplained: mean(&percentages),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeReport {
    pub co2_trend: TrendResult,
    pub temperature_trend: TrendResult,
    pub co2_temperature_correlation: Option<PairCorrelation>,
    pub groundwater_impact: Option<LagCorrelationResult>,
    #[serde(rename = "co2_gap_analysis")]
    pub gap_summary: Option<GapAggregate>,
    pub key_findings: Vec<String>,
}

impl CompositeReport {
    pub fn with_gap_aggregate(mut self, aggregate: Option<GapAggregate>) -> CompositeReport {
        self.gap_summary = aggregate;
        self
    }
}

fn co2_temperature_finding(correlation: &PairCorrelation) -> Option<String> {
    (correlation.correlation > STRONG_CO2_CORRELATION)
        .then(|| "Strong positive correlation between CO2 and temperature".to_string())
}

fn groundwater_finding(lag: &LagCorrelationResult) -> Option<String> {
    (lag.max_correlation < GROUNDWATER_FINDING_THRESHOLD).then(|| {
        format!(
            "Significant negative correlation between groundwater depletion and temperature with {} month lag",
            lag.optimal_lag
        )
    })
}

/// Build a composite report.
///
/// Series are paired positionally after truncation to the shorter length, so they
/// should cover the same months in the same order. An empty groundwater slice is
/// treated as absent.
pub fn analyze(
    co2_series: &[Co2Reading],
    temp_series: &[TemperatureReading],
    groundwater_series: Option<&[GroundwaterReading]>,
) -> CompositeReport {
    let co2_values = values(co2_series);
    let temp_values = values(temp_series);
    let mut key_findings = Vec::new();

    let co2_temperature_correlation = if co2_values.len() >= MIN_CORRELATION_POINTS
        && temp_values.len() >= MIN_CORRELATION_POINTS
    {
        let n = co2_values.len().min(temp_values.len());
        let correlation = pearson(&co2_values[..n], &temp_values[..n]);
        key_findings.extend(co2_temperature_finding(&correlation));
        Some(correlation)
    } else {
        None
    };

    let groundwater_impact = match groundwater_series.filter(|gw| !gw.is_empty()) {
        Some(gw) => {
            let gw_values = values(gw);
            let n = gw_values.len().min(temp_values.len());
            match compute_lag_correlation(&gw_values[..n], &temp_values[..n], DEFAULT_MAX_LAG_MONTHS) {
                Ok(lag) => {
                    key_findings.extend(groundwater_finding(&lag));
                    Some(lag)
                }
                Err(e) => {
                    warn!("composite: skipping groundwater impact: {}", e);
                    None
                }
            }
        }
        None => None,
    };

    debug!(
        "composite: {} CO2, {} temperature points, {} findings",
        co2_values.len(),
        temp_values.len(),
        key_findings.len()
    );

    CompositeReport {
        co2_trend: fit_trend(&co2_values),
        temperature_trend: fit_trend(&temp_values),
        co2_temperature_correlation,
        groundwater_impact,
        gap_summary: None,
        key_findings,
    }
}
