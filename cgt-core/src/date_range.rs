use chrono::NaiveDate;
use std::fmt;

use crate::observation::Observable;

/// An inclusive, optionally open-ended window of dates.
///
/// `None` on either side means "earliest available" / "latest available".
#[derive(Clone, Eq, PartialEq, Copy, Debug, Default)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateWindow {
        DateWindow { start, end }
    }

    /// A window with no bounds.
    pub fn unbounded() -> DateWindow {
        DateWindow::default()
    }

    /// Returns true if the date lies inside the window (inclusive on both ends).
    pub fn contains(&self, date: &NaiveDate) -> bool {
        if let Some(start) = self.start {
            if *date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if *date > end {
                return false;
            }
        }
        true
    }

    /// Keep only the observations dated inside the window.
    pub fn filter<T: Observable>(&self, series: Vec<T>) -> Vec<T> {
        series
            .into_iter()
            .filter(|obs| self.contains(&obs.date()))
            .collect()
    }
}

/// Renders as `{start}_{end}` with `None` for an open bound; used in cache keys.
impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |d: Option<NaiveDate>| match d {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "None".to_string(),
        };
        write!(f, "{}_{}", render(self.start), render(self.end))
    }
}
