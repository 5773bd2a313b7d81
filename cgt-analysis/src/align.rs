//! Month-key alignment of two series.

use cgt_core::month_key::MonthKey;
use cgt_core::observation::Observable;
use std::collections::BTreeMap;

/// Index a series by calendar month. When several readings fall in the same
/// month the last one in input order wins.
pub fn month_index<T: Observable>(series: &[T]) -> BTreeMap<MonthKey, &T> {
    series.iter().map(|obs| (obs.month_key(), obs)).collect()
}

/// Inner join of two series on calendar month, in chronological order.
pub fn inner_join<'a, A: Observable, B: Observable>(
    left: &'a [A],
    right: &'a [B],
) -> Vec<(MonthKey, &'a A, &'a B)> {
    let right_index = month_index(right);
    month_index(left)
        .into_iter()
        .filter_map(|(month, l)| right_index.get(&month).map(|r| (month, l, *r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgt_core::observation::DatedObservation;
    use chrono::NaiveDate;

    fn obs(y: i32, m: u32, d: u32, value: f64) -> DatedObservation {
        DatedObservation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), value)
    }

    #[test]
    fn test_inner_join_keeps_common_months_sorted() {
        let left = vec![obs(2020, 3, 1, 3.0), obs(2020, 1, 1, 1.0), obs(2020, 2, 1, 2.0)];
        let right = vec![obs(2020, 2, 15, 20.0), obs(2020, 3, 15, 30.0), obs(2020, 4, 15, 40.0)];
        let joined = inner_join(&left, &right);
        let months: Vec<String> = joined.iter().map(|(m, _, _)| m.to_string()).collect();
        assert_eq!(months, vec!["2020-02", "2020-03"]);
        assert_eq!(joined[0].1.value, 2.0);
        assert_eq!(joined[0].2.value, 20.0);
    }

    #[test]
    fn test_last_reading_in_month_wins() {
        let series = vec![obs(2021, 5, 1, 1.0), obs(2021, 5, 20, 2.0)];
        let index = month_index(&series);
        assert_eq!(index.len(), 1);
        assert_eq!(index.values().next().unwrap().value, 2.0);
    }

    #[test]
    fn test_disjoint_series_join_empty() {
        let left = vec![obs(2020, 1, 1, 1.0)];
        let right = vec![obs(2021, 1, 1, 1.0)];
        assert!(inner_join(&left, &right).is_empty());
    }
}
