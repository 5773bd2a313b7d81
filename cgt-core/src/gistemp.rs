//! Parser for the NASA GISTEMP monthly anomaly table (`GLB.Ts+dSST.csv`).
//!
//! The table starts with a title line, then a `Year,Jan,...,Dec,J-D,...` header.
//! Each data row holds a year followed by twelve monthly anomalies in °C;
//! months not yet published are written as `***`.

use chrono::NaiveDate;
use log::warn;

use crate::observation::{TemperatureReading, GLOBAL_BASELINE_TEMP};

/// Year + 12 months + annual mean.
pub const MIN_FIELDS: usize = 14;

pub const GISS_SOURCE: &str = "NASA GISS";
pub const GLOBAL_REGION: &str = "Global";

/// Parse the GISTEMP table into one reading per published month.
///
/// Absolute temperatures are reconstructed as `GLOBAL_BASELINE_TEMP + anomaly`.
pub fn parse_global_anomalies(body: &str) -> Vec<TemperatureReading> {
    let lines: Vec<&str> = body.trim().lines().collect();
    let data_start = lines
        .iter()
        .position(|line| line.starts_with("Year"))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let mut readings = Vec::new();
    for line in &lines[data_start..] {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < MIN_FIELDS {
            continue;
        }
        let year = match parts[0].trim().parse::<i32>() {
            Ok(year) => year,
            Err(_) => {
                warn!("Error parsing temperature line: {}", line);
                continue;
            }
        };
        for month in 1..=12u32 {
            let cell = parts[month as usize].trim();
            if cell.is_empty() || cell == "***" {
                continue;
            }
            let anomaly = match cell.parse::<f64>() {
                Ok(anomaly) => anomaly,
                Err(_) => {
                    warn!("Error parsing anomaly {:?} for {}-{:02}", cell, year, month);
                    continue;
                }
            };
            let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) else {
                continue;
            };
            readings.push(TemperatureReading {
                date,
                temperature_celsius: GLOBAL_BASELINE_TEMP + anomaly,
                temperature_anomaly: Some(anomaly),
                region: GLOBAL_REGION.to_string(),
                source: GISS_SOURCE.to_string(),
            });
        }
    }
    readings
}

/// True when the body looks like a GISTEMP table rather than a plain series CSV.
pub fn looks_like_gistemp(body: &str) -> bool {
    body.lines().any(|line| line.starts_with("Year,Jan"))
}

#[cfg(test)]
mod tests {
    use super::{looks_like_gistemp, parse_global_anomalies};
    use chrono::NaiveDate;

    const STR_RESULT: &str = r#"Land-Ocean: Global Means
Year,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec,J-D,D-N,DJF,MAM,JJA,SON
2023,.87,.97,1.20,1.00,.94,1.08,1.19,1.19,1.48,1.34,1.42,1.37,1.17,1.14,.92,1.05,1.15,1.41
2024,1.24,1.44,1.39,***,***,***,***,***,***,***,***,***,****,****,1.34,****,****,****
"#;

    #[test]
    fn test_parse_global_anomalies() {
        let readings = parse_global_anomalies(STR_RESULT);
        assert_eq!(readings.len(), 15);
        assert_eq!(readings[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(readings[0].temperature_anomaly, Some(0.87));
        assert!((readings[0].temperature_celsius - 14.87).abs() < 1e-9);
        let last = readings.last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(last.region, "Global");
    }

    #[test]
    fn test_detects_table_layout() {
        assert!(looks_like_gistemp(STR_RESULT));
        assert!(!looks_like_gistemp("date,temperature\n2024-01-01,15.1\n"));
    }
}
