//! Lane selection predicate.
//!
//! A `LaneQuery` is handed to [`MapStore::lanes`](crate::MapStore::lanes).
//! Stores may evaluate any subset of it natively (the SQLite backend pushes
//! the attribute filters into SQL) but must return only lanes for which
//! [`LaneQuery::matches`] holds.

use rp_core::{LaneKindFilter, LocalBounds};

use crate::LaneDoc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaneQuery {
    /// Junction / road selection by parent id.
    pub kind:          LaneKindFilter,
    /// Only lanes tagged as driving lanes.
    pub driving_only:  bool,
    /// Inclusive lower bound on `max_speed`.
    pub min_max_speed: Option<f64>,
    /// Keep lanes with at least one center-line vertex in this box.
    pub touching:      Option<LocalBounds>,
}

impl LaneQuery {
    pub fn new(kind: LaneKindFilter) -> Self {
        Self { kind, ..Self::default() }
    }

    /// Lanes eligible to carry road status: road lanes, driving, with a speed
    /// limit of at least `v_min`.
    pub fn road_status_candidates(v_min: f64) -> Self {
        Self {
            kind:          LaneKindFilter::RoadOnly,
            driving_only:  true,
            min_max_speed: Some(v_min),
            touching:      None,
        }
    }

    pub fn touching(mut self, bounds: LocalBounds) -> Self {
        self.touching = Some(bounds);
        self
    }

    pub fn matches(&self, lane: &LaneDoc) -> bool {
        self.kind.admits(lane.kind())
            && (!self.driving_only || lane.lane_type.is_driving())
            && self.min_max_speed.is_none_or(|v| lane.max_speed >= v)
            && self.touching.is_none_or(|b| b.touches(&lane.line))
    }
}
