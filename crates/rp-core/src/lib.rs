//! `rp-core` — foundational types for the `sim_replay` workspace.
//!
//! Every other `rp-*` crate depends on this one.  It has no `rp-*`
//! dependencies and only `serde` + `thiserror` externally.
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `LaneId`, `RoadId`, `AoiId`                                |
//! | [`geo`]      | `XY`, `LonLat`, `LocalBounds`, `LonLatBounds`              |
//! | [`kind`]     | `JUNCTION_ID_THRESHOLD`, `LaneKind`, `LaneType`, `LaneKindFilter` |
//! | [`metadata`] | `SimMetadata`, `MapReference`                              |
//! | [`round`]    | `to_fixed` precision rounding                              |
//! | [`error`]    | `CoreError`, `CoreResult`                                  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod metadata;
pub mod round;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{LocalBounds, LonLat, LonLatBounds, XY};
pub use ids::{AoiId, LaneId, RoadId};
pub use kind::{JUNCTION_ID_THRESHOLD, LaneKind, LaneKindFilter, LaneType};
pub use metadata::{MapReference, SimMetadata};
pub use round::to_fixed;
