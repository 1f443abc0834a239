//! Simulation metadata as read from the metadata table.
//!
//! Metadata rows are owned by an external store and consumed read-only.  The
//! map path, road-status parameters, and schema version are internal and are
//! never serialized back to clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, LonLatBounds};

/// One row of the simulation metadata table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimMetadata {
    /// Simulation name; unique across the metadata table.
    pub name: String,
    /// First recorded step.
    pub start: i64,
    /// Total number of recorded steps.
    pub steps: i64,
    /// Seconds of simulated time per step.
    pub time: f64,
    pub total_agents: i64,

    /// Map location in the document store, formatted `"database.collection"`.
    #[serde(skip_serializing)]
    pub map: String,

    // ── Microscopic area (WGS84) ──────────────────────────────────────────
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,

    // ── Road status ───────────────────────────────────────────────────────
    /// Minimum lane max-speed for a lane to carry road status.
    #[serde(default, skip_serializing)]
    pub road_status_v_min: Option<f64>,
    /// Steps between two recorded road-status snapshots.
    #[serde(default, skip_serializing)]
    pub road_status_interval: Option<i64>,

    #[serde(default, skip_serializing)]
    pub version: i32,
}

impl SimMetadata {
    /// The microscopic area as a validated WGS84 box.
    pub fn bounds(&self) -> CoreResult<LonLatBounds> {
        LonLatBounds::new(self.min_lng, self.min_lat, self.max_lng, self.max_lat)
    }

    /// Parse [`map`](Self::map) into its database and collection parts.
    pub fn map_reference(&self) -> CoreResult<MapReference> {
        self.map.parse()
    }
}

// ── MapReference ──────────────────────────────────────────────────────────────

/// Location of one map's documents: a database and a collection within it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapReference {
    pub database:   String,
    pub collection: String,
}

impl MapReference {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self { database: database.into(), collection: collection.into() }
    }
}

impl FromStr for MapReference {
    type Err = CoreError;

    /// Split `"database.collection"` into exactly two non-empty parts.
    fn from_str(s: &str) -> CoreResult<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            [db, col] if !db.is_empty() && !col.is_empty() => Ok(MapReference::new(*db, *col)),
            _ => Err(CoreError::MapReferenceFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for MapReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}
