//! Lane classification.
//!
//! Upstream maps encode two independent facts about a lane in raw integers:
//! whether it belongs to a junction or a road (by comparing `parent_id` with
//! a fixed threshold) and whether it is drivable (by a type tag).  Both are
//! decoded here, once, into closed enums.

use serde::{Deserialize, Serialize};

/// Parent ids at or above this value are junctions; below it, roads.
pub const JUNCTION_ID_THRESHOLD: i32 = 300_000_000;

/// Whether a lane sits inside a junction or along a road.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LaneKind {
    Junction,
    Road,
}

impl LaneKind {
    #[inline]
    pub fn from_parent_id(parent_id: i32) -> Self {
        if parent_id >= JUNCTION_ID_THRESHOLD {
            LaneKind::Junction
        } else {
            LaneKind::Road
        }
    }
}

/// Lane type tag.  Only driving lanes are distinguished; every other tag is
/// carried through untouched so it can be echoed back to the client.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum LaneType {
    Driving,
    Other(i32),
}

impl LaneType {
    /// Raw tag used by the map format for driving lanes.
    pub const DRIVING_TAG: i32 = 1;

    #[inline]
    pub fn from_tag(tag: i32) -> Self {
        if tag == Self::DRIVING_TAG {
            LaneType::Driving
        } else {
            LaneType::Other(tag)
        }
    }

    #[inline]
    pub fn tag(self) -> i32 {
        match self {
            LaneType::Driving => Self::DRIVING_TAG,
            LaneType::Other(t) => t,
        }
    }

    #[inline]
    pub fn is_driving(self) -> bool {
        matches!(self, LaneType::Driving)
    }
}

impl From<i32> for LaneType {
    fn from(tag: i32) -> Self {
        LaneType::from_tag(tag)
    }
}

impl From<LaneType> for i32 {
    fn from(t: LaneType) -> i32 {
        t.tag()
    }
}

/// Which lanes a lane-level extraction should return.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LaneKindFilter {
    #[default]
    All,
    JunctionOnly,
    RoadOnly,
}

impl LaneKindFilter {
    /// `true` if a lane of `kind` passes this filter.
    #[inline]
    pub fn admits(self, kind: LaneKind) -> bool {
        match self {
            LaneKindFilter::All => true,
            LaneKindFilter::JunctionOnly => kind == LaneKind::Junction,
            LaneKindFilter::RoadOnly => kind == LaneKind::Road,
        }
    }
}

impl std::str::FromStr for LaneKindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LaneKindFilter::All),
            "junction" => Ok(LaneKindFilter::JunctionOnly),
            "road" => Ok(LaneKindFilter::RoadOnly),
            other => Err(format!(
                "invalid lane kind {other:?}: expected \"all\", \"junction\", or \"road\""
            )),
        }
    }
}
