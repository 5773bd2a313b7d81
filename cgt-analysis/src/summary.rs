//! Headline statistics over a gap series and over a groundwater record.

use cgt_core::month_key::MonthKey;
use cgt_core::observation::GroundwaterReading;
use cgt_utils::dates::years_between;
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::gap::GapPoint;
use crate::stats::{mean, round_to};
use crate::trend::TrendDirection;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Period {
    pub start: MonthKey,
    pub end: MonthKey,
    pub data_points: usize,
}

/// Unexplained warming in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapStatistics {
    pub mean_gap_celsius: f64,
    pub max_gap_celsius: f64,
    pub min_gap_celsius: f64,
    pub latest_gap_celsius: f64,
    /// `increasing` when the latest gap exceeds the first one.
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentageStatistics {
    pub mean_gap_percentage: f64,
    pub max_gap_percentage: f64,
    pub latest_gap_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapSummary {
    pub period: Period,
    pub gap_statistics: GapStatistics,
    pub percentage_statistics: PercentageStatistics,
    pub key_finding: String,
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Summarize a chronological gap series.
pub fn summarize_gap_series(points: &[GapPoint]) -> Result<GapSummary> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(AnalysisError::InsufficientData {
                required: 1,
                actual: 0,
            })
        }
    };

    let gaps: Vec<f64> = points.iter().map(|p| p.gap.unexplained_gap).collect();
    let percentages: Vec<f64> = points.iter().map(|p| p.gap.gap_percentage).collect();
    let mean_percentage = mean(&percentages);

    let trend = if last.gap.unexplained_gap > first.gap.unexplained_gap {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    Ok(GapSummary {
        period: Period {
            start: first.month,
            end: last.month,
            data_points: points.len(),
        },
        gap_statistics: GapStatistics {
            mean_gap_celsius: mean(&gaps),
            max_gap_celsius: max_of(&gaps),
            min_gap_celsius: min_of(&gaps),
            latest_gap_celsius: last.gap.unexplained_gap,
            trend,
        },
        percentage_statistics: PercentageStatistics {
            mean_gap_percentage: mean_percentage,
            max_gap_percentage: max_of(&percentages),
            latest_gap_percentage: last.gap.gap_percentage,
        },
        key_finding: format!(
            "On average, {}% of observed warming cannot be explained by CO2 alone",
            round_to(mean_percentage, 1)
        ),
    })
}

/// Level statistics for one monitoring location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundwaterSummary {
    pub location: String,
    pub average_level: f64,
    /// Last level minus first level, in meters.
    pub total_depletion: f64,
    /// Meters per year.
    pub depletion_rate: f64,
    pub latest_level: f64,
    pub data_points: usize,
}

/// Summarize a chronological groundwater record; `None` when it is empty.
pub fn summarize_groundwater(readings: &[GroundwaterReading]) -> Option<GroundwaterSummary> {
    let first = readings.first()?;
    let last = readings.last()?;

    let levels: Vec<f64> = readings.iter().map(|r| r.water_level_m).collect();
    let total_depletion = last.water_level_m - first.water_level_m;
    let years = years_between(&first.date, &last.date);
    let depletion_rate = if years > 0.0 {
        total_depletion / years
    } else {
        0.0
    };

    Some(GroundwaterSummary {
        location: first.location.clone(),
        average_level: mean(&levels),
        total_depletion,
        depletion_rate,
        latest_level: last.water_level_m,
        data_points: readings.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gap::{analyze_gap_series, GapModelConfig};
    use cgt_core::observation::{Co2Reading, TemperatureReading};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gap_points(pairs: &[(u32, f64, f64)]) -> Vec<GapPoint> {
        let co2: Vec<Co2Reading> = pairs
            .iter()
            .map(|(m, ppm, _)| Co2Reading {
                date: day(2023, *m, 1),
                ppm: *ppm,
                location: "Mauna Loa".to_string(),
                source: "NOAA".to_string(),
            })
            .collect();
        let temps: Vec<TemperatureReading> = pairs
            .iter()
            .map(|(m, _, celsius)| TemperatureReading {
                date: day(2023, *m, 1),
                temperature_celsius: *celsius,
                temperature_anomaly: None,
                region: "Global".to_string(),
                source: "NASA GISS".to_string(),
            })
            .collect();
        analyze_gap_series(&co2, &temps, "Global", &GapModelConfig::default()).unwrap()
    }

    fn well(date: NaiveDate, level: f64) -> GroundwaterReading {
        GroundwaterReading {
            date,
            water_level_m: level,
            change_from_baseline: None,
            location: "California Central Valley".to_string(),
            source: "USGS".to_string(),
        }
    }

    #[test]
    fn test_empty_gap_series_is_insufficient() {
        assert!(matches!(
            summarize_gap_series(&[]),
            Err(AnalysisError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_gap_summary_statistics() {
        let points = gap_points(&[(1, 419.0, 15.0), (2, 420.0, 15.3), (3, 421.0, 15.1)]);
        let summary = summarize_gap_series(&points).unwrap();

        assert_eq!(summary.period.start.to_string(), "2023-01");
        assert_eq!(summary.period.end.to_string(), "2023-03");
        assert_eq!(summary.period.data_points, 3);

        let gaps: Vec<f64> = points.iter().map(|p| p.gap.unexplained_gap).collect();
        let stats = summary.gap_statistics;
        assert!((stats.mean_gap_celsius - gaps.iter().sum::<f64>() / 3.0).abs() < 1e-12);
        assert_eq!(stats.max_gap_celsius, gaps[1]);
        assert_eq!(stats.latest_gap_celsius, gaps[2]);
        assert!(stats.min_gap_celsius <= stats.mean_gap_celsius);
        assert_eq!(stats.trend, TrendDirection::Increasing);
        assert_eq!(
            summary.percentage_statistics.latest_gap_percentage,
            points[2].gap.gap_percentage
        );
        assert!(summary.key_finding.starts_with("On average, "));
        assert!(summary
            .key_finding
            .ends_with("% of observed warming cannot be explained by CO2 alone"));
    }

    #[test]
    fn test_gap_summary_decreasing_trend() {
        let points = gap_points(&[(1, 419.0, 15.4), (2, 421.0, 15.0)]);
        let summary = summarize_gap_series(&points).unwrap();
        assert_eq!(summary.gap_statistics.trend, TrendDirection::Decreasing);
    }

    #[test]
    fn test_groundwater_summary() {
        let readings = vec![
            well(day(2020, 1, 1), -30.0),
            well(day(2021, 1, 1), -30.5),
            well(day(2022, 1, 1), -31.0),
        ];
        let summary = summarize_groundwater(&readings).unwrap();
        assert_eq!(summary.location, "California Central Valley");
        assert!((summary.average_level + 30.5).abs() < 1e-12);
        assert!((summary.total_depletion + 1.0).abs() < 1e-12);
        // 731 days over 365.25
        assert!((summary.depletion_rate + 1.0 / (731.0 / 365.25)).abs() < 1e-12);
        assert_eq!(summary.latest_level, -31.0);
        assert_eq!(summary.data_points, 3);
    }

    #[test]
    fn test_groundwater_summary_zero_span() {
        let readings = vec![well(day(2020, 1, 1), -30.0), well(day(2020, 1, 1), -30.2)];
        let summary = summarize_groundwater(&readings).unwrap();
        assert_eq!(summary.depletion_rate, 0.0);
        assert!(summarize_groundwater(&[]).is_none());
    }
}
