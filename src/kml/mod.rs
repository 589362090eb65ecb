//! A small KML tree: exactly the nodes a station map needs, nothing more.
//!
//! Build a [`Kml`] from [`Feature`]s and serialize it with [`Kml::to_xml`].

pub mod error;
mod writer;

use crate::kml::error::KmlError;
use crate::types::observation::Point;

pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Root `<kml>` element holding a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct Kml {
    pub document: Document,
}

impl Kml {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Serializes the tree, indenting nested elements by two spaces when `pretty` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use century::{Document, Kml};
    ///
    /// let kml = Kml::new(Document::new("empty"));
    /// let xml = kml.to_xml(false).unwrap();
    /// assert!(xml.ends_with("<Document><name>empty</name></Document></kml>"));
    /// ```
    pub fn to_xml(&self, pretty: bool) -> Result<String, KmlError> {
        writer::write_kml(self, pretty)
    }
}

/// A named `<Document>` grouping all features of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub features: Vec<Feature>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: impl Into<Feature>) {
        self.features.push(feature.into());
    }

    pub fn placemarks(&self) -> impl Iterator<Item = &Placemark> {
        self.features.iter().filter_map(|f| match f {
            Feature::Placemark(p) => Some(p),
            _ => None,
        })
    }

    pub fn ground_overlays(&self) -> impl Iterator<Item = &GroundOverlay> {
        self.features.iter().filter_map(|f| match f {
            Feature::GroundOverlay(o) => Some(o),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Placemark(Placemark),
    GroundOverlay(GroundOverlay),
}

impl From<Placemark> for Feature {
    fn from(value: Placemark) -> Self {
        Feature::Placemark(value)
    }
}

impl From<GroundOverlay> for Feature {
    fn from(value: GroundOverlay) -> Self {
        Feature::GroundOverlay(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placemark {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Reference to a shared style, e.g. `#cold`.
    pub style_url: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(Vec<Point>),
    /// Outer boundary only. The writer closes the ring if the last point
    /// differs from the first.
    Polygon(Vec<Point>),
}

/// An image draped over a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundOverlay {
    pub name: Option<String>,
    pub icon_href: String,
    pub lat_lon_box: LatLonBox,
}

/// Bounds in decimal degrees; `rotation` is counter-clockwise degrees about the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub rotation: f64,
}

impl LatLonBox {
    pub const FULL_GLOBE: LatLonBox = LatLonBox {
        north: 90.0,
        south: -90.0,
        east: 180.0,
        west: -180.0,
        rotation: 0.0,
    };
}
