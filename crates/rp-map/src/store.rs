//! The document-store contract.

use rp_core::{LocalBounds, MapReference};

use crate::{AoiDoc, LaneDoc, LaneQuery, MapHeader, MapResult, RoadDoc};

/// Read-only access to map geometry collections.
///
/// Every call is one independent query; no two calls are atomic with respect
/// to each other.  Implementations must be shareable across concurrent
/// requests.
pub trait MapStore: Send + Sync {
    /// The map's header.
    ///
    /// # Errors
    ///
    /// [`MapError::HeaderMissing`](crate::MapError::HeaderMissing) when there
    /// is no header or it carries no projection.
    fn header(&self, map: &MapReference) -> MapResult<MapHeader>;

    /// Lanes satisfying `query`, in no particular order.
    fn lanes(&self, map: &MapReference, query: &LaneQuery) -> MapResult<Vec<LaneDoc>>;

    /// All roads of the map, in no particular order.
    fn roads(&self, map: &MapReference) -> MapResult<Vec<RoadDoc>>;

    /// Areas that carry an `area` attribute, optionally restricted to those
    /// with a boundary vertex inside `touching`.
    fn aois(&self, map: &MapReference, touching: Option<&LocalBounds>) -> MapResult<Vec<AoiDoc>>;
}
