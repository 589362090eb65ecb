//! A Polars-backed observation collection.
//!
//! Observations are flattened into one row each with the columns
//! `ts`, `st`, `lon`, `lat`, `temp` and `temp_quality`. The hourly aggregation runs
//! as a single lazy query, so a parquet-backed store only reads what the window needs.

use crate::store::error::StoreError;
use crate::store::ObservationStore;
use crate::types::hour_window::HourWindow;
use crate::types::observation::{
    extract_point, AirTemperature, Observation, StationAggregate, VALID_QUALITY,
};
use log::{debug, info};
use polars::prelude::*;
use serde_json::json;
use std::path::Path;

const TS: &str = "ts";
const STATION: &str = "st";
const LON: &str = "lon";
const LAT: &str = "lat";
const TEMP: &str = "temp";
const TEMP_QUALITY: &str = "temp_quality";

#[derive(Clone)]
pub struct FrameStore {
    /// The underlying frame, one row per observation.
    pub frame: LazyFrame,
}

impl FrameStore {
    /// Wraps a `LazyFrame` that already has the flattened observation columns.
    /// `ts` must be a timezone-naive datetime column. `lon`, `lat` and `temp` may be
    /// any numeric type; they are read as `f64`.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    pub fn from_parquet(path: &Path) -> Result<Self, StoreError> {
        let frame = LazyFrame::scan_parquet(path, Default::default())
            .map_err(|e| StoreError::ParquetScan(path.to_path_buf(), e))?;
        info!("Scanning observations from {}", path.display());
        Ok(Self::new(frame))
    }

    /// Flattens documents into rows. Positions that are not a plain
    /// longitude/latitude pair end up as null `lon`/`lat`.
    pub fn from_observations(observations: &[Observation]) -> Result<Self, StoreError> {
        let points: Vec<_> = observations
            .iter()
            .map(|o| o.position.as_ref().and_then(extract_point))
            .collect();

        let df = df!(
            TS => observations.iter().map(|o| o.ts).collect::<Vec<_>>(),
            STATION => observations.iter().map(|o| o.st.as_str()).collect::<Vec<_>>(),
            LON => points.iter().map(|p| p.map(|p| p.longitude)).collect::<Vec<_>>(),
            LAT => points.iter().map(|p| p.map(|p| p.latitude)).collect::<Vec<_>>(),
            TEMP => observations
                .iter()
                .map(|o| o.air_temperature.as_ref().and_then(|t| t.value))
                .collect::<Vec<_>>(),
            TEMP_QUALITY => observations
                .iter()
                .map(|o| o.air_temperature.as_ref().and_then(|t| t.quality.as_deref()))
                .collect::<Vec<_>>()
        )?;

        Ok(Self::new(df.lazy()))
    }

    /// Collects the frame and writes it as a snappy-compressed parquet file.
    pub fn write_parquet(&self, path: &Path) -> Result<(), StoreError> {
        let mut df = self.frame.clone().collect()?;
        let file = std::fs::File::create(path)
            .map_err(|e| StoreError::ParquetWriteIo(path.to_path_buf(), e))?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut df)
            .map_err(|e| StoreError::ParquetWritePolars(path.to_path_buf(), e))?;
        Ok(())
    }
}

impl ObservationStore for FrameStore {
    fn aggregate_hour(&self, window: &HourWindow) -> Result<Vec<StationAggregate>, StoreError> {
        // Timestamps are compared as naive values, like the stored `ts` column.
        let in_window = col(TS)
            .gt_eq(lit(window.start()))
            .and(col(TS).lt(lit(window.end())));

        let grouped = self
            .frame
            .clone()
            .filter(
                in_window
                    .and(col(TEMP_QUALITY).eq(lit(VALID_QUALITY)))
                    .and(col(STATION).is_not_null()),
            )
            .group_by_stable([col(STATION)])
            .agg([
                col(LON).cast(DataType::Float64).first(),
                col(LAT).cast(DataType::Float64).first(),
                col(TEMP).cast(DataType::Float64).first(),
                col(TEMP_QUALITY).first(),
            ])
            .collect()?;

        let ids = grouped.column(STATION)?.str()?;
        let lons = grouped.column(LON)?.f64()?;
        let lats = grouped.column(LAT)?.f64()?;
        let temps = grouped.column(TEMP)?.f64()?;
        let qualities = grouped.column(TEMP_QUALITY)?.str()?;

        let stations: Vec<StationAggregate> = (0..grouped.height())
            .filter_map(|idx| {
                let id = ids.get(idx)?;
                let position = match (lons.get(idx), lats.get(idx)) {
                    (Some(lon), Some(lat)) => {
                        Some(json!({"type": "Point", "coordinates": [lon, lat]}))
                    }
                    _ => None,
                };
                let air_temperature = qualities.get(idx).map(|quality| AirTemperature {
                    value: temps.get(idx),
                    quality: Some(quality.to_string()),
                });
                Some(StationAggregate {
                    id: id.to_string(),
                    position,
                    air_temperature,
                })
            })
            .collect();

        debug!("Aggregated {} stations for {}", stations.len(), window);
        Ok(stations)
    }
}
