//! Bounding-box feature extraction.
//!
//! # Inclusion rule
//!
//! A lane or area is kept iff **at least one** vertex lies in the closed
//! local box.  Kept geometry is never clipped, so a long lane with one vertex
//! inside renders in full, extending past the box.
//!
//! The store is asked to pre-filter, but the rule is re-applied here on the
//! decoded geometry so the result does not depend on how faithfully a
//! backend evaluates it.

use geojson::Feature;
use log::debug;

use rp_core::{LaneKindFilter, LocalBounds, MapReference};
use rp_map::{LaneQuery, MapStore};
use rp_proj::Projector;

use crate::FeatureResult;
use crate::feature::{aoi_feature, lane_feature};

/// Lanes of kind `filter` that touch `bounds`, as WGS84 line strings with
/// `id` and `type` properties.
pub fn extract_lanes<S: MapStore + ?Sized>(
    store:     &S,
    map:       &MapReference,
    projector: &Projector,
    bounds:    &LocalBounds,
    filter:    LaneKindFilter,
) -> FeatureResult<Vec<Feature>> {
    let query = LaneQuery::new(filter).touching(*bounds);
    let lanes = store.lanes(map, &query)?;

    let mut features = Vec::with_capacity(lanes.len());
    for lane in lanes.iter().filter(|l| bounds.touches(&l.line)) {
        let coordinates = projector.positions(&lane.line)?;
        features.push(lane_feature(lane.id.0, lane.lane_type, coordinates));
    }
    debug!("{map}: {} of {} {filter:?} lane(s) inside box", features.len(), lanes.len());
    Ok(features)
}

/// Areas of interest that touch `bounds`, as WGS84 polygons with an `id`
/// property.
///
/// Only records carrying an `area` attribute are areal; among those, the
/// spatial predicate is the sole filter.
pub fn extract_areas<S: MapStore + ?Sized>(
    store:     &S,
    map:       &MapReference,
    projector: &Projector,
    bounds:    &LocalBounds,
) -> FeatureResult<Vec<Feature>> {
    let aois = store.aois(map, Some(bounds))?;

    let mut features = Vec::with_capacity(aois.len());
    for aoi in aois.iter().filter(|a| bounds.touches(&a.positions)) {
        let ring = projector.positions(&aoi.positions)?;
        features.push(aoi_feature(aoi.id, ring));
    }
    debug!("{map}: {} area(s) inside box", features.len());
    Ok(features)
}
