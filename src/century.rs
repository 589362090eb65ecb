//! Main entry point: render the stations of one hour window as a KML document.
//!
//! A [`Century`] borrows an [`ObservationStore`] and a [`Triangulator`] and produces,
//! for any [`HourWindow`], one `<Document>` with a placemark per reporting station,
//! the triangulation shapes, and a ground overlay covering the globe.

use crate::error::CenturyError;
use crate::kml::{Kml, Placemark};
use crate::render::{assemble, full_globe_overlay, station_placemark};
use crate::store::ObservationStore;
use crate::triangles::{NoTriangles, Triangulator};
use crate::types::hour_window::HourWindow;
use bon::bon;
use log::info;
use std::time::Instant;

const DEFAULT_DOCUMENT_NAME: &str = "stations";

/// Renders station maps from a shared, read-only store.
///
/// # Examples
///
/// ```
/// use century::{Century, HourWindow, MemoryStore};
///
/// let store = MemoryStore::new();
/// let century = Century::without_triangles(&store);
/// let window: HourWindow = "1978-10-01 10".parse().unwrap();
///
/// let xml = century
///     .stations()
///     .window(window)
///     .icon_href("http://localhost/temps.png")
///     .call()
///     .unwrap();
/// assert_eq!(xml.matches("<GroundOverlay>").count(), 1);
/// ```
pub struct Century<'a> {
    store: &'a dyn ObservationStore,
    triangulator: &'a dyn Triangulator,
}

#[bon]
impl<'a> Century<'a> {
    pub fn new(store: &'a dyn ObservationStore, triangulator: &'a dyn Triangulator) -> Self {
        Self {
            store,
            triangulator,
        }
    }

    /// A renderer whose documents contain stations and the overlay only.
    pub fn without_triangles(store: &'a dyn ObservationStore) -> Self {
        Self::new(store, &NoTriangles)
    }

    /// Builds the KML tree for one hour window.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.window(HourWindow)`: **Required.** The hour to render.
    /// * `.icon_href(&str)`: **Required.** Image URL for the full-globe ground overlay. Not validated.
    /// * `.document_name(&str)`: Optional. Name of the `<Document>`. Defaults to `"stations"`.
    ///
    /// # Errors
    ///
    /// Returns [`CenturyError::Store`] if the store query fails and
    /// [`CenturyError::Triangulation`] if the triangulator fails. Stations with a missing
    /// or malformed position are not errors; their placemark simply has no geometry.
    #[builder]
    pub fn stations_document(
        &self,
        window: HourWindow,
        icon_href: &str,
        document_name: Option<&str>,
    ) -> Result<Kml, CenturyError> {
        let document_name = document_name.unwrap_or(DEFAULT_DOCUMENT_NAME);
        let start = Instant::now();

        let stations = self.store.aggregate_hour(&window)?;
        let placemarks: Vec<Placemark> = stations.iter().map(station_placemark).collect();
        let triangles = self.triangulator.triangles(&window, self.store)?;

        let kml = assemble(
            document_name,
            placemarks,
            triangles,
            full_globe_overlay(icon_href),
        );

        info!(
            "stations({}): {:.3} seconds, {} docs",
            window,
            start.elapsed().as_secs_f64(),
            stations.len()
        );
        Ok(kml)
    }

    /// Renders one hour window to a KML string.
    ///
    /// Takes the same arguments as [`Century::stations_document`] plus
    /// `.pretty_print(bool)`, which indents the output and defaults to `false`.
    ///
    /// # Errors
    ///
    /// As [`Century::stations_document`], plus [`CenturyError::Kml`] if serialization fails.
    #[builder]
    pub fn stations(
        &self,
        window: HourWindow,
        icon_href: &str,
        pretty_print: Option<bool>,
        document_name: Option<&str>,
    ) -> Result<String, CenturyError> {
        let kml = self
            .stations_document()
            .window(window)
            .icon_href(icon_href)
            .maybe_document_name(document_name)
            .call()?;
        Ok(kml.to_xml(pretty_print.unwrap_or(false))?)
    }
}

/// Renders the stations active in `window` as a KML string.
///
/// Shorthand for building a [`Century`] and calling [`Century::stations`].
pub fn stations(
    window: HourWindow,
    store: &dyn ObservationStore,
    triangulator: &dyn Triangulator,
    icon_href: &str,
    pretty_print: bool,
) -> Result<String, CenturyError> {
    Century::new(store, triangulator)
        .stations()
        .window(window)
        .icon_href(icon_href)
        .pretty_print(pretty_print)
        .call()
}
