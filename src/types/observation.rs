//! Observation documents as stored in the `data` collection, and the per-station
//! aggregate produced for one hour window.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Quality code of an accepted air temperature reading.
pub const VALID_QUALITY: &str = "1";

/// A single reading from one station.
///
/// `position` is kept as raw JSON: it is expected to be a GeoJSON point
/// (`{"type": "Point", "coordinates": [lon, lat]}`) but the source data is not
/// guaranteed to be well-formed. Use [`extract_point`] to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub ts: NaiveDateTime,
    pub st: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    #[serde(
        rename = "airTemperature",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub air_temperature: Option<AirTemperature>,
}

impl Observation {
    pub fn has_valid_temperature(&self) -> bool {
        self.air_temperature
            .as_ref()
            .is_some_and(AirTemperature::is_valid)
    }
}

/// Air temperature in degrees Celsius together with its quality code.
///
/// The quality code is a string in the collection. A missing code, or one stored
/// with another JSON type (e.g. the number `1`), loads as `None` and never counts
/// as valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirTemperature {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(
        default,
        deserialize_with = "quality_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub quality: Option<String>,
}

impl AirTemperature {
    pub fn is_valid(&self) -> bool {
        self.quality.as_deref() == Some(VALID_QUALITY)
    }
}

fn quality_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_str().map(str::to_string)))
}

/// One station's first valid reading inside an hour window.
#[derive(Debug, Clone, PartialEq)]
pub struct StationAggregate {
    pub id: String,
    pub position: Option<Value>,
    pub air_temperature: Option<AirTemperature>,
}

impl StationAggregate {
    pub fn point(&self) -> Option<Point> {
        self.position.as_ref().and_then(extract_point)
    }
}

/// Longitude/latitude pair in decimal degrees, in GeoJSON order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Reads the `coordinates` of a GeoJSON-like point.
///
/// Returns `None` unless `coordinates` is an array of exactly two finite numbers.
/// The order is taken as-is: GeoJSON and KML both put longitude first.
pub fn extract_point(position: &Value) -> Option<Point> {
    match position.get("coordinates")?.as_array()?.as_slice() {
        [lon, lat] => {
            let longitude = lon.as_f64().filter(|v| v.is_finite())?;
            let latitude = lat.as_f64().filter(|v| v.is_finite())?;
            Some(Point::new(longitude, latitude))
        }
        _ => None,
    }
}
