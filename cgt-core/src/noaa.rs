//! Parser for the NOAA GML monthly mean CO2 table (`co2_mm_mlo.txt`).
//!
//! The file is whitespace separated with `#` comment lines:
//!
//! ```text
//! # year month decimal  average  deseasonalized  ndays  sdev  unc
//!   2024    1  2024.042   422.80   421.57          27    0.72  0.26
//! ```
//!
//! Missing months carry a negative average (e.g. `-99.99`) and are skipped.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::observation::Co2Reading;

/// Minimum number of columns for a usable data line.
pub const MIN_COLUMNS: usize = 5;

pub const MAUNA_LOA: &str = "Mauna Loa";
pub const NOAA_SOURCE: &str = "NOAA";

/// Parse the monthly Mauna Loa CO2 table into readings dated the first of each month.
///
/// Malformed lines are logged and skipped; they never fail the whole parse.
pub fn parse_monthly_co2(body: &str) -> Vec<Co2Reading> {
    let mut readings = Vec::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < MIN_COLUMNS {
            continue;
        }
        let parsed = (
            parts[0].parse::<i32>(),
            parts[1].parse::<u32>(),
            parts[2].parse::<f64>(),
            parts[3].parse::<f64>(),
        );
        let (year, month, average_ppm) = match parsed {
            (Ok(year), Ok(month), Ok(_decimal_date), Ok(average)) => (year, month, average),
            _ => {
                warn!("Error parsing CO2 line: {}", line);
                continue;
            }
        };
        if average_ppm < 0.0 {
            debug!("Skipping missing CO2 month {}-{:02}", year, month);
            continue;
        }
        let date = match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(date) => date,
            None => {
                warn!("Invalid CO2 month in line: {}", line);
                continue;
            }
        };
        readings.push(Co2Reading {
            date,
            ppm: average_ppm,
            location: MAUNA_LOA.to_string(),
            source: NOAA_SOURCE.to_string(),
        });
    }
    readings
}

#[cfg(test)]
mod tests {
    use super::parse_monthly_co2;
    use chrono::NaiveDate;

    const STR_RESULT: &str = r#"# --------------------------------------------------------------------
# USE OF NOAA GML DATA
#
#            decimal       monthly    de-season  #days  st.dev  unc. of
#             date         average     alized          of days  mon mean
  1958    3   1958.2027     315.71     314.44     -1   -9.99   -0.99
  1958    4   1958.2877     317.45     315.16     -1   -9.99   -0.99
  1958    6   1958.4548     -99.99     316.54     -1   -9.99   -0.99
  2024    1   2024.0417     422.80     421.57     27    0.72    0.26
  2024   xx   2024.1250     424.55     422.55     29    0.60    0.21
  2024    3
"#;

    #[test]
    fn test_parse_monthly_co2() {
        let readings = parse_monthly_co2(STR_RESULT);
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].date, NaiveDate::from_ymd_opt(1958, 3, 1).unwrap());
        assert_eq!(readings[0].ppm, 315.71);
        assert_eq!(readings[0].location, "Mauna Loa");
        assert_eq!(readings[2].ppm, 422.80);
    }

    #[test]
    fn test_missing_months_are_skipped() {
        let readings = parse_monthly_co2(STR_RESULT);
        assert!(readings
            .iter()
            .all(|r| r.date != NaiveDate::from_ymd_opt(1958, 6, 1).unwrap()));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(parse_monthly_co2("").is_empty());
        assert!(parse_monthly_co2("# only comments\n").is_empty());
    }
}
