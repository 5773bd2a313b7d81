//! Core types for CO2, temperature and groundwater series.
//!
//! Everything the analysis crate consumes reduces to a [`observation::DatedObservation`];
//! the typed readings keep dataset metadata (location, region, source) alongside the value.

pub mod cache;
pub mod date_range;
pub mod error;
pub mod gistemp;
pub mod groundwater;
pub mod month_key;
pub mod noaa;
pub mod observation;
pub mod series_csv;
