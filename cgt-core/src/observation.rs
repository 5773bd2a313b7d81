use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::month_key::MonthKey;

/// Global mean surface temperature used as the anomaly baseline, in °C.
pub const GLOBAL_BASELINE_TEMP: f64 = 14.0;

/// The minimal `(date, value)` unit every analysis routine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedObservation {
    pub date: NaiveDate,
    pub value: f64,
}

impl DatedObservation {
    pub fn new(date: NaiveDate, value: f64) -> DatedObservation {
        DatedObservation { date, value }
    }
}

/// Monthly atmospheric CO2 concentration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Co2Reading {
    pub date: NaiveDate,
    /// Concentration in parts per million
    pub ppm: f64,
    pub location: String,
    pub source: String,
}

/// A temperature reading with an optional anomaly against a fixed baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub date: NaiveDate,
    pub temperature_celsius: f64,
    pub temperature_anomaly: Option<f64>,
    pub region: String,
    pub source: String,
}

impl TemperatureReading {
    /// The recorded anomaly, or the deviation from [`GLOBAL_BASELINE_TEMP`] when the
    /// dataset did not carry one.
    pub fn anomaly_or_derived(&self) -> f64 {
        self.temperature_anomaly
            .unwrap_or(self.temperature_celsius - GLOBAL_BASELINE_TEMP)
    }
}

/// A groundwater level reading.
///
/// Levels are meters relative to land surface, so depletion shows up as
/// increasingly negative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundwaterReading {
    pub date: NaiveDate,
    pub water_level_m: f64,
    pub change_from_baseline: Option<f64>,
    pub location: String,
    pub source: String,
}

/// Common view over the typed readings.
pub trait Observable {
    fn date(&self) -> NaiveDate;
    fn value(&self) -> f64;

    fn month_key(&self) -> MonthKey {
        self.date().into()
    }

    fn to_dated(&self) -> DatedObservation {
        DatedObservation::new(self.date(), self.value())
    }
}

impl Observable for DatedObservation {
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn value(&self) -> f64 {
        self.value
    }
}

impl Observable for Co2Reading {
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn value(&self) -> f64 {
        self.ppm
    }
}

impl Observable for TemperatureReading {
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn value(&self) -> f64 {
        self.temperature_celsius
    }
}

impl Observable for GroundwaterReading {
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn value(&self) -> f64 {
        self.water_level_m
    }
}

/// Extract the value sequence of a series, preserving order.
pub fn values<T: Observable>(series: &[T]) -> Vec<f64> {
    series.iter().map(Observable::value).collect()
}
