//! Strongly typed identifier wrappers for map entities.
//!
//! Map documents carry signed 32-bit ids.  Wrapping them keeps a road id from
//! being passed where a lane id is expected, which matters in the road → lane
//! reduction where both kinds of id are in flight at once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around `i32`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<i32> for $name {
            #[inline(always)]
            fn from(raw: i32) -> Self {
                $name(raw)
            }
        }

        impl From<$name> for i32 {
            #[inline(always)]
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

typed_id! {
    /// Id of a lane (driving or walking path segment).
    pub struct LaneId;
}

typed_id! {
    /// Id of a road: an ordered group of lanes.
    pub struct RoadId;
}

typed_id! {
    /// Id of an area of interest (building, parking lot, …).
    pub struct AoiId;
}
