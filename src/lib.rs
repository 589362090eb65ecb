mod century;
mod error;
mod kml;
mod render;
mod store;
mod triangles;
mod types;

pub use century::*;
pub use error::CenturyError;

pub use kml::error::KmlError;
pub use kml::{
    Document, Feature, Geometry, GroundOverlay, Kml, LatLonBox, Placemark, KML_NAMESPACE,
};
pub use render::{assemble, full_globe_overlay, station_placemark};

pub use store::error::StoreError;
pub use store::frame_store::FrameStore;
pub use store::memory_store::MemoryStore;
pub use store::ObservationStore;

pub use triangles::{NoTriangles, TriangulationError, Triangulator};

pub use types::hour_window::{HourWindow, HourWindowError};
pub use types::observation::{
    extract_point, AirTemperature, Observation, Point, StationAggregate, VALID_QUALITY,
};
