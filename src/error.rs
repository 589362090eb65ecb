use crate::kml::error::KmlError;
use crate::store::error::StoreError;
use crate::triangles::TriangulationError;
use crate::types::hour_window::HourWindowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CenturyError {
    #[error(transparent)]
    HourWindow(#[from] HourWindowError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),

    #[error(transparent)]
    Kml(#[from] KmlError),
}
