//! Per-step replay records.
//!
//! Field names on the wire are camelCase.  Positions are WGS84 degrees.

use serde::{Deserialize, Serialize};

use rp_core::{LonLat, to_fixed};

/// Decimal places kept for heading angles (radians).
pub const DIRECTION_PRECISION: i32 = 2;
/// Decimal places kept for longitude and latitude.
pub const LNG_LAT_PRECISION: i32 = 8;

/// A row of a stepped replay table.
pub trait StepRecord: Clone + Send + Sync {
    fn step(&self) -> i64;

    /// A copy of this row relabelled to `step`.
    fn with_step(&self, step: i64) -> Self;

    /// WGS84 position used by area filters.  Rows without one are never
    /// filtered out by area.
    fn position(&self) -> Option<LonLat> {
        None
    }
}

// ── Road status ───────────────────────────────────────────────────────────────

/// Congestion level of one road at one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadStatus {
    pub step:  i64,
    /// Road id.
    pub id:    i32,
    /// Congestion level, 0 (unknown) to 6.
    pub level: i32,
}

impl StepRecord for RoadStatus {
    fn step(&self) -> i64 {
        self.step
    }

    fn with_step(&self, step: i64) -> Self {
        Self { step, ..self.clone() }
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub step:           i64,
    pub id:             i32,
    /// Lane the vehicle is on.
    pub lane_id:        i32,
    /// Heading in radians, 0 is north.
    pub direction:      f64,
    pub lng:            f64,
    pub lat:            f64,
    /// Render model name.
    pub model:          String,
    /// Elevation in metres.
    pub z:              f64,
    /// Pitch in radians, 0 is level.
    pub pitch:          f64,
    /// Speed in m/s.
    pub v:              f64,
    pub num_passengers: i32,
}

impl Vehicle {
    /// Round heading and position to client precision.
    pub fn rounded(mut self) -> Self {
        self.direction = to_fixed(self.direction, DIRECTION_PRECISION);
        self.lng = to_fixed(self.lng, LNG_LAT_PRECISION);
        self.lat = to_fixed(self.lat, LNG_LAT_PRECISION);
        self
    }
}

impl StepRecord for Vehicle {
    fn step(&self) -> i64 {
        self.step
    }

    fn with_step(&self, step: i64) -> Self {
        Self { step, ..self.clone() }
    }

    fn position(&self) -> Option<LonLat> {
        Some(LonLat::new(self.lng, self.lat))
    }
}

// ── Pedestrian ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pedestrian {
    pub step:      i64,
    pub id:        i32,
    /// Area of interest or lane the person is in.
    pub parent_id: i32,
    pub direction: f64,
    pub lng:       f64,
    pub lat:       f64,
    pub z:         f64,
    pub v:         f64,
    pub model:     String,
}

impl Pedestrian {
    pub fn rounded(mut self) -> Self {
        self.direction = to_fixed(self.direction, DIRECTION_PRECISION);
        self.lng = to_fixed(self.lng, LNG_LAT_PRECISION);
        self.lat = to_fixed(self.lat, LNG_LAT_PRECISION);
        self
    }
}

impl StepRecord for Pedestrian {
    fn step(&self) -> i64 {
        self.step
    }

    fn with_step(&self, step: i64) -> Self {
        Self { step, ..self.clone() }
    }

    fn position(&self) -> Option<LonLat> {
        Some(LonLat::new(self.lng, self.lat))
    }
}

// ── Traffic light ─────────────────────────────────────────────────────────────

/// Signal state of one lane at one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficLight {
    pub step:  i64,
    /// Lane id.
    pub id:    i32,
    /// 0 none, 1 red, 2 green, 3 yellow.
    pub state: i32,
    /// Stop-line position; used for filtering only.
    #[serde(default, skip_serializing)]
    pub lng:   f64,
    #[serde(default, skip_serializing)]
    pub lat:   f64,
}

impl StepRecord for TrafficLight {
    fn step(&self) -> i64 {
        self.step
    }

    fn with_step(&self, step: i64) -> Self {
        Self { step, ..self.clone() }
    }

    fn position(&self) -> Option<LonLat> {
        Some(LonLat::new(self.lng, self.lat))
    }
}
