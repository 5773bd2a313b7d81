//! Lag correlation commands.

use cgt_analysis::chart::{
    align_groundwater_temperature, analyze_groundwater_temperature, time_lag_chart,
    MIN_OVERLAPPING_MONTHS,
};
use cgt_analysis::lag::compute_lag_correlation;
use cgt_core::date_range::DateWindow;
use cgt_core::gistemp::GLOBAL_REGION;
use log::info;

use crate::loader::SeriesLoader;
use crate::print_json;

/// Check the raw series before handing them to the correlator.
fn validate_series(groundwater: &[f64], temperature: &[f64]) -> anyhow::Result<()> {
    if groundwater.len() != temperature.len() {
        anyhow::bail!(
            "Groundwater and temperature series must have the same length ({} vs {})",
            groundwater.len(),
            temperature.len()
        );
    }
    if groundwater.len() < MIN_OVERLAPPING_MONTHS {
        anyhow::bail!(
            "Need at least {} data points for correlation analysis, got {}",
            MIN_OVERLAPPING_MONTHS,
            groundwater.len()
        );
    }
    Ok(())
}

/// Lag correlation of two series given directly on the command line.
pub fn run_lag(groundwater: &[f64], temperature: &[f64], max_lag: usize) -> anyhow::Result<()> {
    validate_series(groundwater, temperature)?;
    let result = compute_lag_correlation(groundwater, temperature, max_lag)
        .map_err(|e| anyhow::anyhow!("Lag correlation failed: {}", e))?;
    print_json(&result)
}

/// Month-aligned groundwater/temperature lag analysis, or its chart rows.
pub async fn run_correlate(
    groundwater_path: &str,
    temperature_path: &str,
    location: &str,
    max_lag: usize,
    window: &DateWindow,
    chart: bool,
) -> anyhow::Result<()> {
    let mut loader = SeriesLoader::in_memory();
    let groundwater = loader.load_groundwater(groundwater_path, location, window).await?;
    let temperatures = loader
        .load_temperature(temperature_path, GLOBAL_REGION, window)
        .await?;
    if groundwater.is_empty() || temperatures.is_empty() {
        anyhow::bail!("Insufficient data for analysis");
    }

    let aligned = align_groundwater_temperature(&groundwater, &temperatures)
        .map_err(|e| anyhow::anyhow!("Cannot align {}: {}", location, e))?;
    info!("Aligned {} months for {}", aligned.len(), location);

    let analysis = analyze_groundwater_temperature(location, &aligned, max_lag)
        .map_err(|e| anyhow::anyhow!("Lag correlation failed for {}: {}", location, e))?;
    if chart {
        print_json(&time_lag_chart(location, &aligned, &analysis.correlation_analysis))
    } else {
        print_json(&analysis)
    }
}
