//! `rp-feature` — turn stored map geometry into GeoJSON for the client.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`extract`] | `extract_lanes`, `extract_areas`                           |
//! | [`road`]    | `select_road_lanes`, `aggregate_road_lanes`, `RoadLane`    |
//! | [`feature`] | GeoJSON feature constructors                               |
//! | [`error`]   | `FeatureError`, `FeatureResult<T>`                         |
//!
//! # Pipeline
//!
//! ```text
//! MapStore ──query──▶ LaneDoc / AoiDoc (local CRS)
//!          ──filter─▶ at least one vertex in the local box
//!          ──reproject every vertex─▶ [lng, lat]
//!          ──▶ geojson::Feature { id, properties: { id, type? } }
//! ```
//!
//! All outputs are unordered.  An empty vector is a successful result.

pub mod error;
pub mod extract;
pub mod feature;
pub mod road;


pub use error::{FeatureError, FeatureResult};
pub use extract::{extract_areas, extract_lanes};
pub use feature::{aoi_feature, feature_collection, lane_feature};
pub use road::{RoadLane, aggregate_road_lanes, select_road_lanes};
