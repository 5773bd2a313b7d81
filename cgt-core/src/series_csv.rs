//! Plain CSV series with a header row, e.g.
//!
//! ```text
//! date,ppm
//! 2024-01-01,421.78
//! ```
//!
//! Dates may be `YYYY-MM-DD`, an ISO datetime, or `YYYY-MM`. Column names are
//! matched case-insensitively against a short list of aliases per field.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};

use crate::error::ParseError;
use crate::observation::{Co2Reading, GroundwaterReading, TemperatureReading};

const DATE_COLUMNS: &[&str] = &["date", "datetime", "month"];
const CO2_COLUMNS: &[&str] = &["ppm", "co2_ppm", "co2", "value"];
const TEMPERATURE_COLUMNS: &[&str] = &["temperature_celsius", "temperature", "temp", "value"];
const ANOMALY_COLUMNS: &[&str] = &["temperature_anomaly", "anomaly"];
const LEVEL_COLUMNS: &[&str] = &["water_level_m", "water_level", "level", "value"];
const CHANGE_COLUMNS: &[&str] = &["change_from_baseline", "change"];

/// Metadata attached to every reading parsed from one file.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLabel {
    /// Location (CO2, groundwater) or region (temperature)
    pub place: String,
    pub source: String,
}

impl SeriesLabel {
    pub fn new(place: &str, source: &str) -> SeriesLabel {
        SeriesLabel {
            place: place.to_string(),
            source: source.to_string(),
        }
    }
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(alias))
    })
}

fn require_column(headers: &StringRecord, aliases: &[&str]) -> Result<usize, ParseError> {
    find_column(headers, aliases).ok_or_else(|| ParseError::MissingColumn(aliases[0].to_string()))
}

fn parse_cell(record: &StringRecord, idx: usize) -> Option<f64> {
    record.get(idx).and_then(|s| s.trim().parse::<f64>().ok())
}

fn parse_date_cell(record: &StringRecord, idx: usize) -> Option<NaiveDate> {
    record
        .get(idx)
        .and_then(|s| cgt_utils::dates::parse_flexible_date(s).ok())
}

/// Walk every record, handing `(date, record)` to `build`. Rows with an unparsable date
/// or a `None` from `build` are counted and skipped.
fn read_rows<T>(
    csv_data: &str,
    date_idx: usize,
    mut build: impl FnMut(NaiveDate, &StringRecord) -> Option<T>,
) -> Result<Vec<T>, ParseError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv_data.as_bytes());

    let mut rows = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let record = result?;
        let row = parse_date_cell(&record, date_idx).and_then(|date| build(date, &record));
        match row {
            Some(row) => rows.push(row),
            None => {
                skipped += 1;
                warn!("Skipping unparsable row: {:?}", record);
            }
        }
    }
    info!("Parsed {} rows ({} skipped)", rows.len(), skipped);
    Ok(rows)
}

fn headers_of(csv_data: &str) -> Result<StringRecord, ParseError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    Ok(rdr.headers()?.clone())
}

/// Parse a `date,ppm` CSV into CO2 readings.
pub fn parse_co2_csv(csv_data: &str, label: &SeriesLabel) -> Result<Vec<Co2Reading>, ParseError> {
    let headers = headers_of(csv_data)?;
    let date_idx = require_column(&headers, DATE_COLUMNS)?;
    let ppm_idx = require_column(&headers, CO2_COLUMNS)?;
    read_rows(csv_data, date_idx, |date, record| {
        parse_cell(record, ppm_idx).map(|ppm| Co2Reading {
            date,
            ppm,
            location: label.place.clone(),
            source: label.source.clone(),
        })
    })
}

/// Parse a `date,temperature[,anomaly]` CSV into temperature readings.
pub fn parse_temperature_csv(
    csv_data: &str,
    label: &SeriesLabel,
) -> Result<Vec<TemperatureReading>, ParseError> {
    let headers = headers_of(csv_data)?;
    let date_idx = require_column(&headers, DATE_COLUMNS)?;
    let temp_idx = require_column(&headers, TEMPERATURE_COLUMNS)?;
    let anomaly_idx = find_column(&headers, ANOMALY_COLUMNS);
    read_rows(csv_data, date_idx, |date, record| {
        parse_cell(record, temp_idx).map(|temperature_celsius| TemperatureReading {
            date,
            temperature_celsius,
            temperature_anomaly: anomaly_idx.and_then(|idx| parse_cell(record, idx)),
            region: label.place.clone(),
            source: label.source.clone(),
        })
    })
}

/// Parse a `date,water_level_m[,change_from_baseline]` CSV into groundwater readings.
///
/// Missing baseline changes stay `None`; [`crate::groundwater::prepare_groundwater`]
/// derives them once the series has been cut to its date window.
pub fn parse_groundwater_csv(
    csv_data: &str,
    label: &SeriesLabel,
) -> Result<Vec<GroundwaterReading>, ParseError> {
    let headers = headers_of(csv_data)?;
    let date_idx = require_column(&headers, DATE_COLUMNS)?;
    let level_idx = require_column(&headers, LEVEL_COLUMNS)?;
    let change_idx = find_column(&headers, CHANGE_COLUMNS);
    read_rows(csv_data, date_idx, |date, record| {
        parse_cell(record, level_idx).map(|water_level_m| GroundwaterReading {
            date,
            water_level_m,
            change_from_baseline: change_idx.and_then(|idx| parse_cell(record, idx)),
            location: label.place.clone(),
            source: label.source.clone(),
        })
    })
}
