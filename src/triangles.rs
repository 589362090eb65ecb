//! Seam for the coverage triangulation that is drawn on top of the station markers.
//!
//! The triangulation itself lives outside this crate. Anything implementing
//! [`Triangulator`], including a plain closure, can be handed to [`crate::Century`].

use crate::kml::Feature;
use crate::store::ObservationStore;
use crate::types::hour_window::HourWindow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriangulationError {
    #[error("Triangulation failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TriangulationError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TriangulationError::Failed(source.into())
    }
}

/// Produces the shapes for one hour window, reading from the same store as the stations.
pub trait Triangulator {
    fn triangles(
        &self,
        window: &HourWindow,
        store: &dyn ObservationStore,
    ) -> Result<Vec<Feature>, TriangulationError>;
}

impl<F> Triangulator for F
where
    F: Fn(&HourWindow, &dyn ObservationStore) -> Result<Vec<Feature>, TriangulationError>,
{
    fn triangles(
        &self,
        window: &HourWindow,
        store: &dyn ObservationStore,
    ) -> Result<Vec<Feature>, TriangulationError> {
        self(window, store)
    }
}

/// Renders no shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTriangles;

impl Triangulator for NoTriangles {
    fn triangles(
        &self,
        _window: &HourWindow,
        _store: &dyn ObservationStore,
    ) -> Result<Vec<Feature>, TriangulationError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kml::{Geometry, Placemark};
    use crate::store::memory_store::MemoryStore;
    use crate::types::observation::Point;

    #[test]
    fn test_no_triangles() {
        let store = MemoryStore::new();
        let window = HourWindow::from_ymd_h(2001, 1, 1, 0).unwrap();
        assert!(NoTriangles.triangles(&window, &store).unwrap().is_empty());
    }

    #[test]
    fn test_closure_triangulator_sees_window_and_store() {
        let triangulator = |window: &HourWindow,
                            store: &dyn ObservationStore|
         -> Result<Vec<Feature>, TriangulationError> {
            let stations = store
                .aggregate_hour(window)
                .map_err(TriangulationError::new)?;
            Ok(vec![Feature::Placemark(Placemark {
                name: Some(format!("{} stations at {}", stations.len(), window)),
                geometry: Some(Geometry::Polygon(vec![
                    Point::new(0.0, 0.0),
                    Point::new(1.0, 0.0),
                    Point::new(0.0, 1.0),
                ])),
                ..Default::default()
            })])
        };

        let store = MemoryStore::new();
        let window = HourWindow::from_ymd_h(2001, 1, 1, 0).unwrap();
        let shapes = triangulator.triangles(&window, &store).unwrap();
        assert_eq!(shapes.len(), 1);
        assert!(matches!(
            &shapes[0],
            Feature::Placemark(Placemark { name: Some(name), .. }) if name == "0 stations at 2001-01-01 00:00"
        ));
    }

    #[test]
    fn test_failure_wraps_source() {
        let err = TriangulationError::new("not enough stations");
        assert_eq!(err.to_string(), "Triangulation failed: not enough stations");
    }
}
