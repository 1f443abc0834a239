//! `rp-status` — time-indexed replay data.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`record`]     | `RoadStatus`, `Vehicle`, `Pedestrian`, `TrafficLight`, `StepRecord` |
//! | [`congestion`] | `CongestionStat`, `aggregate_congestion`                  |
//! | [`cache`]      | `IntervalCache`: name → road-status sampling interval     |
//! | [`step`]       | `StepSource` contract, `StepQuery`, `LonLatFilter`        |
//! | [`memory`]     | `MemoryStepSource` with a CSV loader                      |
//! | [`error`]      | `StatusError`, `StatusResult<T>`                          |
//!
//! # Stepped tables
//!
//! Replay tables are keyed by `(step, id)` and written every `interval`
//! steps.  A client asks for `begin, begin + sub_interval, …` up to `end`
//! (exclusive); each requested step is served from the latest recorded step
//! at or before it:
//!
//! ```text
//! recorded:   0         5         10        15
//! requested:  0  2  4  6  8  10 12 14
//! served by:  0  0  0  5  5  10 10 10
//! ```

pub mod cache;
pub mod congestion;
pub mod error;
pub mod memory;
pub mod record;
pub mod step;

#[cfg(test)]
mod tests;

pub use cache::{DEFAULT_TTL, IntervalCache};
pub use congestion::{CongestionStat, aggregate_congestion};
pub use error::{StatusError, StatusResult};
pub use memory::MemoryStepSource;
pub use record::{Pedestrian, RoadStatus, StepRecord, TrafficLight, Vehicle};
pub use step::{LonLatFilter, StepQuery, StepSource};
