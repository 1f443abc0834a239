//! `rp-service` — the replay request pipeline.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`service`] | `ReplayService`, `ReplayServiceBuilder`                    |
//! | [`params`]  | `StepRange`, `AreaParams`: validated request parameters    |
//! | [`config`]  | `ServiceConfig`, loaded from JSON                          |
//! | [`error`]   | `ServiceError`, `ErrorKind`, `ServiceResult<T>`            |
//!
//! # Request flow
//!
//! ```text
//! name ──▶ MetadataSource::lookup_one ──▶ SimMetadata
//!            │ map "db.col" ──▶ MapStore::header ──▶ projection
//!            │                       ProjContext::projector (released on every exit)
//!            │ WGS84 box ──▶ resolve_local_bounds ──▶ LocalBounds
//!            └──▶ extract_lanes / extract_areas / aggregate_road_lanes ──▶ FeatureCollection
//!
//! name ──▶ IntervalCache ──miss──▶ metadata ──▶ road_status_interval
//!            └──▶ StepSource<RoadStatus> ──▶ aggregate_congestion ──▶ [CongestionStat]
//! ```
//!
//! Every error is terminal for its request; no partial result accompanies
//! one.  An empty result is a success.

pub mod config;
pub mod error;
pub mod params;
pub mod service;


pub use config::ServiceConfig;
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use params::{AreaParams, StepRange};
pub use service::{ReplayService, ReplayServiceBuilder};
