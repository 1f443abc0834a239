//! Road-level reduction: one representative lane per road.
//!
//! Road lane-id lists are ordered innermost → outermost.  The representative
//! is the **outermost** lane that is also a road-status candidate, found by
//! scanning the list from the end.  The emitted feature is keyed by the
//! road's id, not the lane's.
//!
//! ```text
//! road 7: lane_ids [10, 11, 12]      candidates {10, 12}
//!                          ◀── scan
//!         first hit: 12  → feature id 7, geometry of lane 12
//! ```

use geojson::Feature;
use log::debug;
use rustc_hash::FxHashMap;

use rp_core::{LaneId, MapReference, RoadId};
use rp_map::{LaneDoc, LaneQuery, MapStore, RoadDoc};
use rp_proj::Projector;

use crate::FeatureResult;
use crate::feature::lane_feature;

/// A lane chosen to stand in for a whole road.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadLane {
    pub road: RoadId,
    pub lane: LaneDoc,
}

/// Pick the outermost candidate lane of each road.
///
/// Roads with no candidate lane (including roads with an empty lane list)
/// contribute nothing, so the result is never longer than `roads`.
pub fn select_road_lanes(roads: &[RoadDoc], candidates: Vec<LaneDoc>) -> Vec<RoadLane> {
    let by_id: FxHashMap<LaneId, LaneDoc> = candidates.into_iter().map(|l| (l.id, l)).collect();

    roads
        .iter()
        .filter_map(|road| {
            let lane = road.lane_ids.iter().rev().find_map(|id| by_id.get(id))?;
            Some(RoadLane { road: road.id, lane: lane.clone() })
        })
        .collect()
}

/// One WGS84 line-string feature per road that has a lane eligible for road
/// status (road lane, driving, `max_speed ≥ v_min`).
///
/// Roads and lanes come from two independent queries; a slight skew between
/// them is tolerated.
pub fn aggregate_road_lanes<S: MapStore + ?Sized>(
    store:     &S,
    map:       &MapReference,
    projector: &Projector,
    v_min:     f64,
) -> FeatureResult<Vec<Feature>> {
    let candidates = store.lanes(map, &LaneQuery::road_status_candidates(v_min))?;
    let roads = store.roads(map)?;
    let candidate_count = candidates.len();

    let selected = select_road_lanes(&roads, candidates);
    let mut features = Vec::with_capacity(selected.len());
    for RoadLane { road, lane } in &selected {
        let coordinates = projector.positions(&lane.line)?;
        features.push(lane_feature(road.0, lane.lane_type, coordinates));
    }
    debug!(
        "{map}: {} of {} road(s) represented from {candidate_count} candidate lane(s)",
        features.len(),
        roads.len()
    );
    Ok(features)
}
