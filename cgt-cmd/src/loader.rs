//! Dataset loading for the commands.
//!
//! Files are read once per key and memoized in a [`SeriesCache`]. The format is
//! sniffed from the content: NOAA monthly text and GISTEMP tables are recognized,
//! anything else is read as a headered CSV. A `.gz` suffix is decompressed first.

use anyhow::Context;
use cgt_core::cache::{cache_key, MemoryCache, SeriesCache};
use cgt_core::date_range::DateWindow;
use cgt_core::gistemp::{looks_like_gistemp, parse_global_anomalies};
use cgt_core::groundwater::prepare_groundwater;
use cgt_core::noaa::{parse_monthly_co2, MAUNA_LOA};
use cgt_core::observation::{Co2Reading, GroundwaterReading, TemperatureReading};
use cgt_core::series_csv::{
    parse_co2_csv, parse_groundwater_csv, parse_temperature_csv, SeriesLabel,
};
use flate2::read::GzDecoder;
use log::info;
use std::io::Read;

type Cache<T> = Box<dyn SeriesCache<T> + Send>;

pub struct SeriesLoader {
    co2: Cache<Co2Reading>,
    temperature: Cache<TemperatureReading>,
    groundwater: Cache<GroundwaterReading>,
}

impl SeriesLoader {
    pub fn new(
        co2: Cache<Co2Reading>,
        temperature: Cache<TemperatureReading>,
        groundwater: Cache<GroundwaterReading>,
    ) -> SeriesLoader {
        SeriesLoader {
            co2,
            temperature,
            groundwater,
        }
    }

    /// A loader backed by process-lifetime [`MemoryCache`]s.
    pub fn in_memory() -> SeriesLoader {
        SeriesLoader::new(
            Box::new(MemoryCache::<Co2Reading>::new()),
            Box::new(MemoryCache::<TemperatureReading>::new()),
            Box::new(MemoryCache::<GroundwaterReading>::new()),
        )
    }

    /// Monthly CO2 from a NOAA `co2_mm_mlo.txt` file or a `date,ppm` CSV.
    pub async fn load_co2(
        &mut self,
        path: &str,
        window: &DateWindow,
    ) -> anyhow::Result<Vec<Co2Reading>> {
        let key = cache_key("co2", path, window);
        if let Some(cached) = self.co2.get(&key) {
            info!("Returning cached CO2 data for {}", key);
            return Ok(cached);
        }

        let body = read_dataset(path).await?;
        let readings = if looks_like_noaa_monthly(&body) {
            parse_monthly_co2(&body)
        } else {
            parse_co2_csv(&body, &SeriesLabel::new(MAUNA_LOA, path))
                .with_context(|| format!("Failed to parse CO2 CSV {}", path))?
        };
        let readings = window.filter(readings);
        info!("Loaded {} CO2 readings from {}", readings.len(), path);

        self.co2.put(key, readings.clone());
        Ok(readings)
    }

    /// Temperature from a GISTEMP `GLB.Ts+dSST.csv` table or a
    /// `date,temperature[,anomaly]` CSV labeled with `region`.
    pub async fn load_temperature(
        &mut self,
        path: &str,
        region: &str,
        window: &DateWindow,
    ) -> anyhow::Result<Vec<TemperatureReading>> {
        let key = cache_key(&format!("temperature-{}", region), path, window);
        if let Some(cached) = self.temperature.get(&key) {
            info!("Returning cached temperature data for {}", key);
            return Ok(cached);
        }

        let body = read_dataset(path).await?;
        let readings = if looks_like_gistemp(&body) {
            parse_global_anomalies(&body)
        } else {
            parse_temperature_csv(&body, &SeriesLabel::new(region, path))
                .with_context(|| format!("Failed to parse temperature CSV {}", path))?
        };
        let readings = window.filter(readings);
        info!("Loaded {} temperature readings from {}", readings.len(), path);

        self.temperature.put(key, readings.clone());
        Ok(readings)
    }

    /// Groundwater levels for one location, aggregated to months when dense.
    pub async fn load_groundwater(
        &mut self,
        path: &str,
        location: &str,
        window: &DateWindow,
    ) -> anyhow::Result<Vec<GroundwaterReading>> {
        let key = cache_key(&format!("groundwater-{}", location), path, window);
        if let Some(cached) = self.groundwater.get(&key) {
            info!("Returning cached groundwater data for {}", key);
            return Ok(cached);
        }

        let body = read_dataset(path).await?;
        let readings = parse_groundwater_csv(&body, &SeriesLabel::new(location, path))
            .with_context(|| format!("Failed to parse groundwater CSV {}", path))?;
        let readings = prepare_groundwater(window.filter(readings));
        info!("Loaded {} groundwater readings from {}", readings.len(), path);

        self.groundwater.put(key, readings.clone());
        Ok(readings)
    }

    /// Forget the series cached for `path` over `window`, so the next load rereads
    /// the file. `label` is the region or location the series were loaded under.
    pub fn evict(&mut self, path: &str, label: &str, window: &DateWindow) -> bool {
        let co2 = self.co2.evict(&cache_key("co2", path, window));
        let temperature = self
            .temperature
            .evict(&cache_key(&format!("temperature-{}", label), path, window));
        let groundwater = self
            .groundwater
            .evict(&cache_key(&format!("groundwater-{}", label), path, window));
        co2 || temperature || groundwater
    }
}

/// Read a dataset file, gunzipping it when the path ends in `.gz`.
pub async fn read_dataset(path: &str) -> anyhow::Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;
    decode_dataset(path, &bytes)
}

fn decode_dataset(path: &str, bytes: &[u8]) -> anyhow::Result<String> {
    if path.ends_with(".gz") {
        let mut body = String::new();
        GzDecoder::new(bytes)
            .read_to_string(&mut body)
            .with_context(|| format!("Failed to decompress {}", path))?;
        Ok(body)
    } else {
        String::from_utf8(bytes.to_vec()).with_context(|| format!("{} is not UTF-8", path))
    }
}

/// NOAA monthly files open with `#` comments and use whitespace columns.
fn looks_like_noaa_monthly(body: &str) -> bool {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or(false, |line| line.starts_with('#') || !line.contains(','))
}
