//! Planar and geographic coordinate types.
//!
//! Two coordinate systems meet in this workspace:
//!
//! - **Local CRS** (`XY`): the simulation's projected plane, in metres.  Map
//!   documents store every point this way.
//! - **WGS84** (`LonLat`): geographic degrees, what the visualization client
//!   renders.  Longitude is always the first axis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// A point in the simulation's local projected CRS.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

impl XY {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for XY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XY({:.3}, {:.3})", self.x, self.y)
    }
}

/// A WGS84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lng: f64,
    pub lat: f64,
}

impl LonLat {
    #[inline]
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// GeoJSON position: `[longitude, latitude]`.
    #[inline]
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lng, self.lat]
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LonLat({:.8}, {:.8})", self.lng, self.lat)
    }
}

// ── LocalBounds ───────────────────────────────────────────────────────────────

/// Axis-aligned box in the local CRS.  All four bounds are inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalBounds {
    pub min: XY,
    pub max: XY,
}

impl LocalBounds {
    /// Build the box spanned by two arbitrary corners.
    ///
    /// The corners need not be (min, max) ordered: a projection may flip
    /// either axis, so min and max are recomputed per component.
    pub fn from_corners(a: XY, b: XY) -> Self {
        Self {
            min: XY::new(a.x.min(b.x), a.y.min(b.y)),
            max: XY::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Closed-box membership test.
    #[inline]
    pub fn contains(&self, p: XY) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// `true` if at least one vertex of `points` lies inside the box.
    ///
    /// Geometry is never clipped: a polyline that merely crosses the box with
    /// one vertex inside is kept whole by callers.
    pub fn touches(&self, points: &[XY]) -> bool {
        points.iter().any(|&p| self.contains(p))
    }
}

// ── LonLatBounds ──────────────────────────────────────────────────────────────

/// WGS84 bounding box of a simulation's microscopic area.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLatBounds {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl LonLatBounds {
    /// Construct a box, rejecting inverted or non-finite bounds.
    pub fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> CoreResult<Self> {
        let b = Self { min_lng, min_lat, max_lng, max_lat };
        b.validate()?;
        Ok(b)
    }

    /// Check `min ≤ max` on both axes.
    pub fn validate(&self) -> CoreResult<()> {
        let all_finite = [self.min_lng, self.min_lat, self.max_lng, self.max_lat]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(CoreError::InvalidBounds(format!("non-finite bound in {self:?}")));
        }
        if self.min_lng > self.max_lng || self.min_lat > self.max_lat {
            return Err(CoreError::InvalidBounds(format!("min exceeds max in {self:?}")));
        }
        Ok(())
    }

    #[inline]
    pub fn min_corner(&self) -> LonLat {
        LonLat::new(self.min_lng, self.min_lat)
    }

    #[inline]
    pub fn max_corner(&self) -> LonLat {
        LonLat::new(self.max_lng, self.max_lat)
    }
}
