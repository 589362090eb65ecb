//! Turns aggregated stations into KML features and puts the document together.

use crate::kml::{Document, Feature, Geometry, GroundOverlay, Kml, LatLonBox, Placemark};
use crate::types::observation::StationAggregate;
use log::debug;

/// A marker named after the station. Geometry is attached only when the stored
/// position holds a well-formed longitude/latitude pair.
pub fn station_placemark(station: &StationAggregate) -> Placemark {
    let geometry = station.point().map(Geometry::Point);
    if geometry.is_none() {
        debug!("Station {} has no usable position", station.id);
    }
    Placemark {
        id: Some(station.id.clone()),
        name: Some(station.id.clone()),
        style_url: None,
        geometry,
    }
}

/// An image covering the whole globe.
pub fn full_globe_overlay(icon_href: &str) -> GroundOverlay {
    GroundOverlay {
        name: None,
        icon_href: icon_href.to_string(),
        lat_lon_box: LatLonBox::FULL_GLOBE,
    }
}

/// Stations first, then the triangulation shapes, then the overlay.
pub fn assemble(
    name: &str,
    placemarks: Vec<Placemark>,
    triangles: Vec<Feature>,
    overlay: GroundOverlay,
) -> Kml {
    let mut document = Document::new(name);
    document.features.reserve(placemarks.len() + triangles.len() + 1);
    document
        .features
        .extend(placemarks.into_iter().map(Feature::Placemark));
    document.features.extend(triangles);
    document.push(overlay);
    Kml::new(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::Point;
    use serde_json::json;

    fn aggregate(id: &str, position: Option<serde_json::Value>) -> StationAggregate {
        StationAggregate {
            id: id.to_string(),
            position,
            air_temperature: None,
        }
    }

    #[test]
    fn test_placemark_with_point() {
        let placemark = station_placemark(&aggregate(
            "724940",
            Some(json!({"type": "Point", "coordinates": [-122.4, 37.6]})),
        ));
        assert_eq!(placemark.id.as_deref(), Some("724940"));
        assert_eq!(placemark.name.as_deref(), Some("724940"));
        assert_eq!(
            placemark.geometry,
            Some(Geometry::Point(Point::new(-122.4, 37.6)))
        );
    }

    #[test]
    fn test_placemark_without_usable_position() {
        for position in [None, Some(json!({"coordinates": [1.0]})), Some(json!({}))] {
            let placemark = station_placemark(&aggregate("x", position));
            assert_eq!(placemark.name.as_deref(), Some("x"));
            assert!(placemark.geometry.is_none());
        }
    }

    #[test]
    fn test_assemble_order() {
        let kml = assemble(
            "stations",
            vec![station_placemark(&aggregate("a", None))],
            vec![Feature::Placemark(Placemark {
                name: Some("triangle".to_string()),
                ..Default::default()
            })],
            full_globe_overlay("temps.png"),
        );

        let features = &kml.document.features;
        assert_eq!(kml.document.name, "stations");
        assert_eq!(features.len(), 3);
        assert!(matches!(&features[0], Feature::Placemark(p) if p.id.as_deref() == Some("a")));
        assert!(matches!(&features[1], Feature::Placemark(p) if p.id.is_none()));
        assert!(
            matches!(&features[2], Feature::GroundOverlay(o) if o.lat_lon_box == LatLonBox::FULL_GLOBE)
        );
    }
}
