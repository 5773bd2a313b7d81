//! Shared utility functions for CGT crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    use crate::error::DateError;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse a month string in "YYYY-MM" format, yielding the first day of that month.
    pub fn parse_month(s: &str) -> anyhow::Result<NaiveDate> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| DateError(format!("expected YYYY-MM, got {s:?}")))?;
        let year: i32 = year.trim().parse()?;
        let month: u32 = month.trim().parse()?;
        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DateError(format!("month out of range: {s:?}")).into())
    }

    /// Parse either "YYYY-MM-DD", an ISO datetime prefix ("YYYY-MM-DDTHH:MM:SS"),
    /// or "YYYY-MM".
    ///
    /// Dataset files mix all three, so loaders go through this helper rather than
    /// committing to a single format.
    pub fn parse_flexible_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        if let Some(day_part) = s.get(..10) {
            if let Ok(date) = parse_date(day_part) {
                return Ok(date);
            }
        }
        parse_month(s)
    }

    /// Number of days between two dates expressed in (Julian) years of 365.25 days.
    pub fn years_between(start: &NaiveDate, end: &NaiveDate) -> f64 {
        (*end - *start).num_days() as f64 / 365.25
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_month() {
            let parsed = parse_month("2024-02").unwrap();
            assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
            assert!(parse_month("2024-13").is_err());
            assert!(parse_month("202402").is_err());
        }

        #[test]
        fn test_parse_flexible_date() {
            let day = NaiveDate::from_ymd_opt(2021, 3, 17).unwrap();
            assert_eq!(parse_flexible_date("2021-03-17").unwrap(), day);
            assert_eq!(parse_flexible_date("2021-03-17T06:00:00.000").unwrap(), day);
            assert_eq!(
                parse_flexible_date(" 2021-03 ").unwrap(),
                NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
            );
            assert!(parse_flexible_date("March 2021").is_err());
        }

        #[test]
        fn test_years_between() {
            let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let end = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
            assert!((years_between(&start, &end) - 366.0 / 365.25).abs() < 1e-12);
            assert_eq!(years_between(&start, &start), 0.0);
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
