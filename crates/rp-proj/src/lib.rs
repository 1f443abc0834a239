//! `rp-proj` — coordinate projection between a simulation's local CRS and
//! WGS84.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`projector`] | `ProjContext`, `Transform`, `Projector`, `WGS84_CRS`     |
//! | [`bounds`]    | `resolve_local_bounds`                                   |
//! | [`error`]     | `ProjError`, `ProjResult<T>`                             |
//!
//! # Resource discipline
//!
//! A [`Transform`] is acquired from a [`ProjContext`] for the duration of one
//! request and released when dropped, on every exit path.  The context counts
//! live transforms so leaks are observable.

pub mod bounds;
pub mod error;
pub mod projector;

#[cfg(test)]
mod tests;

pub use bounds::resolve_local_bounds;
pub use error::{ProjError, ProjResult};
pub use projector::{ProjContext, Projector, Transform, WGS84_CRS};
