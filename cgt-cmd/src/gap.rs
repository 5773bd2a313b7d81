//! CO2 gap commands.

use cgt_analysis::gap::{analyze_gap_series, compute_gap, GapModelConfig};
use cgt_analysis::summary::summarize_gap_series;
use cgt_core::date_range::DateWindow;
use log::info;

use crate::loader::SeriesLoader;
use crate::print_json;

/// Gap for a single CO2 concentration and observed temperature.
pub fn run_gap(co2_ppm: f64, actual_temp: f64, config: &GapModelConfig) -> anyhow::Result<()> {
    let result = compute_gap(co2_ppm, actual_temp, config)
        .map_err(|e| anyhow::anyhow!("Failed to compute CO2 gap: {}", e))?;
    print_json(&result)
}

/// Gap series over the months both files cover, or its summary.
pub async fn run_gap_series(
    co2_path: &str,
    temperature_path: &str,
    region: &str,
    window: &DateWindow,
    config: &GapModelConfig,
    summary: bool,
) -> anyhow::Result<()> {
    let mut loader = SeriesLoader::in_memory();
    let co2 = loader.load_co2(co2_path, window).await?;
    let temperatures = loader.load_temperature(temperature_path, region, window).await?;

    let points = analyze_gap_series(&co2, &temperatures, region, config)
        .map_err(|e| anyhow::anyhow!("Gap analysis failed: {}", e))?;
    if points.is_empty() {
        anyhow::bail!(
            "No overlapping months between {} and {}",
            co2_path,
            temperature_path
        );
    }
    info!("Computed {} monthly gaps for {}", points.len(), region);

    if summary {
        let summary = summarize_gap_series(&points)
            .map_err(|e| anyhow::anyhow!("Failed to summarize gap series: {}", e))?;
        print_json(&summary)
    } else {
        print_json(&points)
    }
}
