//! Command implementations for the CGT CLI.
//!
//! Provides subcommands for the CO2 gap model, lag correlation between
//! groundwater and temperature, and the composite climate report. Every
//! command prints its result as pretty JSON on stdout.

use cgt_analysis::gap::{
    GapModelConfig, DEFAULT_BASELINE_CO2, DEFAULT_SENSITIVITY, DEFAULT_SENSITIVITY_RANGE,
};
use cgt_analysis::lag::DEFAULT_MAX_LAG_MONTHS;
use cgt_core::date_range::DateWindow;
use cgt_core::gistemp::GLOBAL_REGION;
use cgt_core::observation::GLOBAL_BASELINE_TEMP;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;

pub mod correlate;
pub mod gap;
pub mod loader;
pub mod report;

/// Default groundwater monitoring location.
pub const DEFAULT_LOCATION: &str = "California Central Valley";

/// Gap model parameters, each overridable from the command line.
#[derive(Args, Debug, Clone, Copy)]
pub struct ModelArgs {
    /// Pre-industrial reference temperature (°C)
    #[arg(long, default_value_t = GLOBAL_BASELINE_TEMP)]
    pub baseline_temp: f64,

    /// Reference CO2 concentration (ppm)
    #[arg(long, default_value_t = DEFAULT_BASELINE_CO2)]
    pub baseline_co2: f64,

    /// Warming per doubling of CO2 (°C)
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY)]
    pub sensitivity: f64,

    /// Low end of the sensitivity range used for the uncertainty band
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY_RANGE.0)]
    pub sensitivity_low: f64,

    /// High end of the sensitivity range used for the uncertainty band
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY_RANGE.1)]
    pub sensitivity_high: f64,
}

impl From<ModelArgs> for GapModelConfig {
    fn from(args: ModelArgs) -> Self {
        GapModelConfig {
            baseline_temp: args.baseline_temp,
            baseline_co2: args.baseline_co2,
            sensitivity: args.sensitivity,
            sensitivity_range: (args.sensitivity_low, args.sensitivity_high),
        }
    }
}

/// Inclusive date bounds applied to every loaded series.
#[derive(Args, Debug, Clone, Copy)]
pub struct WindowArgs {
    /// Earliest date to include (YYYY-MM-DD or YYYY-MM)
    #[arg(long, value_parser = parse_cli_date)]
    pub start: Option<NaiveDate>,

    /// Latest date to include (YYYY-MM-DD or YYYY-MM)
    #[arg(long, value_parser = parse_cli_date)]
    pub end: Option<NaiveDate>,
}

impl WindowArgs {
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start, self.end)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare one observed temperature with the temperature CO2 alone predicts
    Gap {
        /// Atmospheric CO2 concentration (ppm)
        #[arg(long)]
        co2_ppm: f64,

        /// Observed temperature (°C)
        #[arg(long)]
        actual_temp: f64,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Run the gap model for every month present in both CO2 and temperature files
    GapSeries {
        /// NOAA monthly CO2 text file or date,ppm CSV (optionally .gz)
        #[arg(short = 'c', long)]
        co2: String,

        /// GISTEMP table or date,temperature[,anomaly] CSV (optionally .gz)
        #[arg(short = 't', long)]
        temperature: String,

        /// Region label for temperature CSVs
        #[arg(long, default_value = GLOBAL_REGION)]
        region: String,

        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        model: ModelArgs,

        /// Print headline statistics instead of every month
        #[arg(long)]
        summary: bool,
    },

    /// Lag correlation between two comma-separated monthly series
    Lag {
        /// Groundwater levels, e.g. -30.1,-30.2,...
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        groundwater: Vec<f64>,

        /// Temperature values of the same months
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        temperature: Vec<f64>,

        /// Largest lag to test, in months
        #[arg(long, default_value_t = DEFAULT_MAX_LAG_MONTHS as u64,
              value_parser = clap::value_parser!(u64).range(1..=60))]
        max_lag: u64,
    },

    /// Month-aligned lag correlation of a groundwater file against temperature anomalies
    Correlate {
        /// date,water_level_m[,change_from_baseline] CSV (optionally .gz)
        #[arg(short = 'g', long)]
        groundwater: String,

        /// GISTEMP table or date,temperature[,anomaly] CSV (optionally .gz)
        #[arg(short = 't', long)]
        temperature: String,

        /// Groundwater monitoring location
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,

        /// Largest lag to test, in months
        #[arg(long, default_value_t = DEFAULT_MAX_LAG_MONTHS as u64,
              value_parser = clap::value_parser!(u64).range(1..=60))]
        max_lag: u64,

        #[command(flatten)]
        window: WindowArgs,

        /// Print time-lag chart rows instead of the correlation analysis
        #[arg(long)]
        chart: bool,
    },

    /// Trends, correlations, gap aggregate and interpretation in one report
    Comprehensive {
        /// NOAA monthly CO2 text file or date,ppm CSV (optionally .gz)
        #[arg(short = 'c', long)]
        co2: String,

        /// GISTEMP table or date,temperature[,anomaly] CSV (optionally .gz)
        #[arg(short = 't', long)]
        temperature: String,

        /// Optional groundwater CSV to include the groundwater impact section
        #[arg(short = 'g', long)]
        groundwater: Option<String>,

        /// Region label for temperature CSVs
        #[arg(long, default_value = GLOBAL_REGION)]
        region: String,

        /// Groundwater monitoring location
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,

        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Level and depletion statistics for one or more groundwater files
    GroundwaterSummary {
        /// Groundwater CSVs; each file stem names its region
        #[arg(required = true)]
        files: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Gap {
            co2_ppm,
            actual_temp,
            model,
        } => gap::run_gap(co2_ppm, actual_temp, &model.into()),
        Command::GapSeries {
            co2,
            temperature,
            region,
            window,
            model,
            summary,
        } => {
            gap::run_gap_series(&co2, &temperature, &region, &window.window(), &model.into(), summary)
                .await
        }
        Command::Lag {
            groundwater,
            temperature,
            max_lag,
        } => correlate::run_lag(&groundwater, &temperature, max_lag as usize),
        Command::Correlate {
            groundwater,
            temperature,
            location,
            max_lag,
            window,
            chart,
        } => {
            correlate::run_correlate(
                &groundwater,
                &temperature,
                &location,
                max_lag as usize,
                &window.window(),
                chart,
            )
            .await
        }
        Command::Comprehensive {
            co2,
            temperature,
            groundwater,
            region,
            location,
            window,
            model,
        } => {
            let sources = report::Sources {
                co2: &co2,
                temperature: &temperature,
                groundwater: groundwater.as_deref(),
                region: &region,
                location: &location,
            };
            report::run_comprehensive(&sources, &window.window(), &model.into()).await
        }
        Command::GroundwaterSummary { files, window } => {
            report::run_groundwater_summary(&files, &window.window()).await
        }
    }
}

/// Parse a `--start`/`--end` value.
pub fn parse_cli_date(s: &str) -> Result<NaiveDate, String> {
    cgt_utils::dates::parse_flexible_date(s).map_err(|e| e.to_string())
}

/// Write a result to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
