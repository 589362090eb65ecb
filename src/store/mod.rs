//! Read access to the `data` collection of observations.
//!
//! The renderer only needs one query: the first valid reading of every station
//! inside an hour window. [`ObservationStore`] is that query; [`MemoryStore`] and
//! [`FrameStore`] are the two collections shipped with the crate.

pub mod error;
pub mod frame_store;
pub mod memory_store;

use crate::store::error::StoreError;
use crate::types::hour_window::HourWindow;
use crate::types::observation::StationAggregate;

/// A queryable collection of [`crate::Observation`] documents.
pub trait ObservationStore {
    /// Selects documents with `ts` in `[window.start(), window.end())` and an air
    /// temperature quality of `"1"`, then groups them by station id.
    ///
    /// Each group keeps the position and air temperature of the first matching
    /// document in the store's iteration order. Groups are returned in the order
    /// their first document was encountered.
    fn aggregate_hour(&self, window: &HourWindow) -> Result<Vec<StationAggregate>, StoreError>;
}

impl<T: ObservationStore + ?Sized> ObservationStore for &T {
    fn aggregate_hour(&self, window: &HourWindow) -> Result<Vec<StationAggregate>, StoreError> {
        (**self).aggregate_hour(window)
    }
}
