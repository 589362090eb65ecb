use crate::kml::error::KmlError;
use crate::kml::{
    Document, Feature, Geometry, GroundOverlay, Kml, LatLonBox, Placemark, KML_NAMESPACE,
};
use crate::types::observation::Point;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

pub(crate) fn write_kml(kml: &Kml, pretty: bool) -> Result<String, KmlError> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut root = BytesStart::new("kml");
    root.push_attribute(("xmlns", KML_NAMESPACE));
    writer.write_event(Event::Start(root))?;
    write_document(&mut writer, &kml.document)?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_document<W: Write>(writer: &mut Writer<W>, document: &Document) -> Result<(), KmlError> {
    writer.write_event(Event::Start(BytesStart::new("Document")))?;
    text_element(writer, "name", &document.name)?;
    for feature in &document.features {
        match feature {
            Feature::Placemark(placemark) => write_placemark(writer, placemark)?,
            Feature::GroundOverlay(overlay) => write_ground_overlay(writer, overlay)?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    Ok(())
}

fn write_placemark<W: Write>(writer: &mut Writer<W>, placemark: &Placemark) -> Result<(), KmlError> {
    let mut start = BytesStart::new("Placemark");
    if let Some(id) = &placemark.id {
        start.push_attribute(("id", id.as_str()));
    }
    writer.write_event(Event::Start(start))?;

    if let Some(name) = &placemark.name {
        text_element(writer, "name", name)?;
    }
    if let Some(style_url) = &placemark.style_url {
        text_element(writer, "styleUrl", style_url)?;
    }
    if let Some(geometry) = &placemark.geometry {
        write_geometry(writer, geometry)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    Ok(())
}

fn write_geometry<W: Write>(writer: &mut Writer<W>, geometry: &Geometry) -> Result<(), KmlError> {
    match geometry {
        Geometry::Point(point) => {
            writer.write_event(Event::Start(BytesStart::new("Point")))?;
            text_element(writer, "coordinates", &format_coordinates(&[*point]))?;
            writer.write_event(Event::End(BytesEnd::new("Point")))?;
        }
        Geometry::LineString(points) => {
            writer.write_event(Event::Start(BytesStart::new("LineString")))?;
            text_element(writer, "coordinates", &format_coordinates(points))?;
            writer.write_event(Event::End(BytesEnd::new("LineString")))?;
        }
        Geometry::Polygon(points) => {
            let mut ring = points.clone();
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if first != last {
                    ring.push(*first);
                }
            }
            writer.write_event(Event::Start(BytesStart::new("Polygon")))?;
            writer.write_event(Event::Start(BytesStart::new("outerBoundaryIs")))?;
            writer.write_event(Event::Start(BytesStart::new("LinearRing")))?;
            text_element(writer, "coordinates", &format_coordinates(&ring))?;
            writer.write_event(Event::End(BytesEnd::new("LinearRing")))?;
            writer.write_event(Event::End(BytesEnd::new("outerBoundaryIs")))?;
            writer.write_event(Event::End(BytesEnd::new("Polygon")))?;
        }
    }
    Ok(())
}

fn write_ground_overlay<W: Write>(
    writer: &mut Writer<W>,
    overlay: &GroundOverlay,
) -> Result<(), KmlError> {
    writer.write_event(Event::Start(BytesStart::new("GroundOverlay")))?;
    if let Some(name) = &overlay.name {
        text_element(writer, "name", name)?;
    }

    writer.write_event(Event::Start(BytesStart::new("Icon")))?;
    text_element(writer, "href", &overlay.icon_href)?;
    writer.write_event(Event::End(BytesEnd::new("Icon")))?;

    write_lat_lon_box(writer, &overlay.lat_lon_box)?;
    writer.write_event(Event::End(BytesEnd::new("GroundOverlay")))?;
    Ok(())
}

fn write_lat_lon_box<W: Write>(writer: &mut Writer<W>, bounds: &LatLonBox) -> Result<(), KmlError> {
    writer.write_event(Event::Start(BytesStart::new("LatLonBox")))?;
    text_element(writer, "north", &bounds.north.to_string())?;
    text_element(writer, "south", &bounds.south.to_string())?;
    text_element(writer, "east", &bounds.east.to_string())?;
    text_element(writer, "west", &bounds.west.to_string())?;
    text_element(writer, "rotation", &bounds.rotation.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("LatLonBox")))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), KmlError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// KML tuples are `lon,lat`, separated by spaces.
fn format_coordinates(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.longitude, p.latitude))
        .collect::<Vec<_>>()
        .join(" ")
}
