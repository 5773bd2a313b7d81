use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// A calendar month used to align series sampled on different days.
///
/// Ordering is chronological (year first, then month), so a `BTreeMap<MonthKey, _>`
/// iterates oldest to newest.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Create a MonthKey, returning None for a month outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<MonthKey> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| MonthKey { year, month })
    }

    /// The first day of this month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(value: NaiveDate) -> Self {
        MonthKey {
            year: value.year(),
            month: value.month(),
        }
    }
}

impl From<&NaiveDate> for MonthKey {
    fn from(value: &NaiveDate) -> Self {
        (*value).into()
    }
}

impl From<MonthKey> for NaiveDate {
    fn from(value: MonthKey) -> Self {
        value.first_day()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::MonthKey;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[test]
    fn test_from_naive_date_truncates_day() {
        let key: MonthKey = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().into();
        assert_eq!(key, MonthKey::new(2024, 1).unwrap());
        assert_eq!(key.first_day(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(MonthKey::new(2024, 0).is_none());
        assert!(MonthKey::new(2024, 13).is_none());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut map = BTreeMap::new();
        map.insert(MonthKey::new(2023, 2).unwrap(), "b");
        map.insert(MonthKey::new(2022, 12).unwrap(), "a");
        map.insert(MonthKey::new(2023, 10).unwrap(), "c");
        let ordered: Vec<_> = map.values().copied().collect();
        assert_eq!(ordered, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_display_and_serialize() {
        let key = MonthKey::new(2024, 3).unwrap();
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-03\"");
    }
}
