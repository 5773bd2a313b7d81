//! Groundwater series preparation: baseline change and monthly aggregation.

use log::info;
use std::collections::BTreeMap;

use crate::month_key::MonthKey;
use crate::observation::GroundwaterReading;

/// Series longer than this are treated as daily data and averaged per month.
pub const MONTHLY_AGGREGATION_THRESHOLD: usize = 100;

/// Fill in `change_from_baseline` for readings that lack it, using the earliest
/// reading's level as the baseline. Recorded changes are left untouched.
pub fn fill_baseline_change(mut readings: Vec<GroundwaterReading>) -> Vec<GroundwaterReading> {
    readings.sort_by_key(|r| r.date);
    let Some(baseline) = readings.first().map(|r| r.water_level_m) else {
        return readings;
    };
    for reading in &mut readings {
        if reading.change_from_baseline.is_none() {
            reading.change_from_baseline = Some(reading.water_level_m - baseline);
        }
    }
    readings
}

/// Average readings per calendar month, dating each aggregate to the first of the
/// month. Output is in chronological order.
pub fn aggregate_monthly(readings: &[GroundwaterReading]) -> Vec<GroundwaterReading> {
    let mut months: BTreeMap<MonthKey, Vec<&GroundwaterReading>> = BTreeMap::new();
    for reading in readings {
        months.entry(reading.date.into()).or_default().push(reading);
    }

    months
        .into_iter()
        .filter_map(|(month, points)| {
            let first = points.first()?;
            let n = points.len() as f64;
            let avg_level = points.iter().map(|p| p.water_level_m).sum::<f64>() / n;
            let avg_change = points
                .iter()
                .map(|p| p.change_from_baseline.unwrap_or(0.0))
                .sum::<f64>()
                / n;
            Some(GroundwaterReading {
                date: month.first_day(),
                water_level_m: avg_level,
                change_from_baseline: Some(avg_change),
                location: first.location.clone(),
                source: first.source.clone(),
            })
        })
        .collect()
}

/// Derive missing baseline changes, then aggregate to monthly values when the series
/// looks daily. Call after date filtering so the baseline is the first reading kept.
pub fn prepare_groundwater(readings: Vec<GroundwaterReading>) -> Vec<GroundwaterReading> {
    let readings = fill_baseline_change(readings);
    if readings.len() > MONTHLY_AGGREGATION_THRESHOLD {
        let aggregated = aggregate_monthly(&readings);
        info!(
            "Aggregated {} groundwater readings into {} months",
            readings.len(),
            aggregated.len()
        );
        aggregated
    } else {
        readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn reading(date: NaiveDate, level: f64, change: Option<f64>) -> GroundwaterReading {
        GroundwaterReading {
            date,
            water_level_m: level,
            change_from_baseline: change,
            location: "California Central Valley".to_string(),
            source: "USGS".to_string(),
        }
    }

    #[test]
    fn test_fill_baseline_change_sorts_first() {
        let readings = vec![
            reading(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(), -31.0, None),
            reading(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), -30.0, None),
        ];
        let filled = fill_baseline_change(readings);
        assert_eq!(filled[0].change_from_baseline, Some(0.0));
        assert_eq!(filled[1].change_from_baseline, Some(-1.0));
    }

    #[test]
    fn test_fill_baseline_change_empty() {
        assert!(fill_baseline_change(Vec::new()).is_empty());
    }

    #[test]
    fn test_aggregate_monthly_averages() {
        let readings = vec![
            reading(NaiveDate::from_ymd_opt(2021, 5, 3).unwrap(), -10.0, Some(0.0)),
            reading(NaiveDate::from_ymd_opt(2021, 5, 20).unwrap(), -12.0, Some(-2.0)),
            reading(NaiveDate::from_ymd_opt(2021, 4, 9).unwrap(), -9.0, Some(1.0)),
        ];
        let monthly = aggregate_monthly(&readings);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].date, NaiveDate::from_ymd_opt(2021, 4, 1).unwrap());
        assert_eq!(monthly[1].date, NaiveDate::from_ymd_opt(2021, 5, 1).unwrap());
        assert_eq!(monthly[1].water_level_m, -11.0);
        assert_eq!(monthly[1].change_from_baseline, Some(-1.0));
    }

    #[test]
    fn test_prepare_only_aggregates_long_series() {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let daily: Vec<_> = (0..120)
            .map(|i| reading(start + Duration::days(i), -20.0, Some(0.0)))
            .collect();
        let prepared = prepare_groundwater(daily);
        // 31 + 28 + 31 + 30 = 120 days spans January through April
        assert_eq!(prepared.len(), 4);

        let short: Vec<_> = (0..12)
            .map(|i| reading(start + Duration::days(i), -20.0, None))
            .collect();
        assert_eq!(prepare_groundwater(short).len(), 12);
    }

    #[test]
    fn test_prepare_fills_baseline_from_first_kept_reading() {
        let readings = vec![
            reading(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(), -31.5, None),
            reading(NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(), -31.0, None),
        ];
        let prepared = prepare_groundwater(readings);
        assert_eq!(prepared[0].change_from_baseline, Some(0.0));
        assert_eq!(prepared[1].change_from_baseline, Some(-0.5));
    }
}
