//! Map geometry documents.
//!
//! # Stored shape
//!
//! Every record is a `{ "class": ..., "data": {...} }` envelope:
//!
//! ```text
//! header  data: { projection }
//! lane    data: { id, center_line: { nodes: [{x, y}, ...] }, type, parent_id, max_speed }
//! road    data: { id, lane_ids: [...] }
//! aoi     data: { id, positions: [{x, y}, ...], area? }   (area may be null)
//! ```
//!
//! All points are in the map's local CRS.  Unknown extra fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use rp_core::{AoiId, LaneId, LaneKind, LaneType, RoadId, XY};

use crate::{MapError, MapResult};

// ── Envelope ──────────────────────────────────────────────────────────────────

/// The `class` discriminator of a stored document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentClass {
    Header,
    Lane,
    Road,
    Aoi,
}

impl DocumentClass {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentClass::Header => "header",
            DocumentClass::Lane => "lane",
            DocumentClass::Road => "road",
            DocumentClass::Aoi => "aoi",
        }
    }
}

/// One raw record of a map collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub class: DocumentClass,
    pub data:  Value,
}

impl MapDocument {
    pub fn new(class: DocumentClass, data: Value) -> Self {
        Self { class, data }
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

/// Map-wide header; only the projection is used.
#[derive(Clone, Debug, PartialEq)]
pub struct MapHeader {
    /// Local CRS of every point in the map, as an `EPSG:` code or proj string.
    pub projection: String,
}

#[derive(Deserialize)]
struct RawHeader {
    #[serde(default)]
    projection: Option<String>,
}

impl MapHeader {
    /// Decode a header; `None` when the projection is absent or blank.
    pub fn from_data(data: &Value) -> MapResult<Option<Self>> {
        let raw = RawHeader::deserialize(data).map_err(|e| decode_error(DocumentClass::Header, e))?;
        Ok(raw
            .projection
            .filter(|p| !p.trim().is_empty())
            .map(|projection| MapHeader { projection }))
    }

    pub fn to_document(&self) -> MapDocument {
        MapDocument::new(DocumentClass::Header, json!({ "projection": self.projection }))
    }
}

// ── Lane ──────────────────────────────────────────────────────────────────────

/// A lane with its center line.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneDoc {
    pub id:        LaneId,
    /// Center line, at least two points.
    pub line:      Vec<XY>,
    pub lane_type: LaneType,
    /// Road or junction this lane belongs to.
    pub parent_id: i32,
    /// Speed limit in m/s; 0 when absent or null.
    pub max_speed: f64,
}

#[derive(Deserialize)]
struct RawLine {
    nodes: Vec<XY>,
}

#[derive(Deserialize)]
struct RawLane {
    id:          LaneId,
    center_line: RawLine,
    #[serde(rename = "type")]
    lane_type:   LaneType,
    parent_id:   i32,
    #[serde(default)]
    max_speed:   Option<f64>,
}

impl LaneDoc {
    #[inline]
    pub fn kind(&self) -> LaneKind {
        LaneKind::from_parent_id(self.parent_id)
    }

    /// Decode and validate a lane record.
    pub fn from_data(data: &Value) -> MapResult<Self> {
        Self::decode(data)?.validated()
    }

    /// Decode the record shape only.  Stores match the query against this
    /// and validate only the lanes they return.
    pub(crate) fn decode(data: &Value) -> MapResult<Self> {
        let raw = RawLane::deserialize(data).map_err(|e| decode_error(DocumentClass::Lane, e))?;
        Ok(LaneDoc {
            id:        raw.id,
            line:      raw.center_line.nodes,
            lane_type: raw.lane_type,
            parent_id: raw.parent_id,
            max_speed: raw.max_speed.unwrap_or(0.0),
        })
    }

    pub(crate) fn validated(self) -> MapResult<Self> {
        if self.line.len() < 2 {
            return Err(MapError::Decode {
                class:  DocumentClass::Lane.as_str(),
                reason: format!(
                    "lane {} has {} center line point(s), need at least 2",
                    self.id.0,
                    self.line.len()
                ),
            });
        }
        Ok(self)
    }

    pub fn to_document(&self) -> MapDocument {
        MapDocument::new(
            DocumentClass::Lane,
            json!({
                "id":          self.id,
                "center_line": { "nodes": self.line },
                "type":        self.lane_type,
                "parent_id":   self.parent_id,
                "max_speed":   self.max_speed,
            }),
        )
    }
}

// ── Road ──────────────────────────────────────────────────────────────────────

/// A road: lane ids ordered from innermost to outermost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadDoc {
    pub id:       RoadId,
    #[serde(default)]
    pub lane_ids: Vec<LaneId>,
}

impl RoadDoc {
    pub fn from_data(data: &Value) -> MapResult<Self> {
        RoadDoc::deserialize(data).map_err(|e| decode_error(DocumentClass::Road, e))
    }

    pub fn to_document(&self) -> MapDocument {
        MapDocument::new(
            DocumentClass::Road,
            json!({ "id": self.id, "lane_ids": self.lane_ids }),
        )
    }
}

// ── Area of interest ──────────────────────────────────────────────────────────

/// An area of interest bounded by a ring of points.
#[derive(Clone, Debug, PartialEq)]
pub struct AoiDoc {
    pub id:        AoiId,
    pub positions: Vec<XY>,
    /// Surface area in m², `None` when absent or null.
    pub area:      Option<f64>,
}

#[derive(Deserialize)]
struct RawAoi {
    id:        AoiId,
    #[serde(default)]
    positions: Vec<XY>,
    #[serde(default)]
    area:      Option<f64>,
}

impl AoiDoc {
    /// Whether a raw record carries an `area` key, null included.  Records
    /// without one are point-like and never rendered as polygons.
    pub(crate) fn is_areal(data: &Value) -> bool {
        data.get("area").is_some()
    }

    pub fn from_data(data: &Value) -> MapResult<Self> {
        let raw = RawAoi::deserialize(data).map_err(|e| decode_error(DocumentClass::Aoi, e))?;
        Ok(AoiDoc { id: raw.id, positions: raw.positions, area: raw.area })
    }

    pub fn to_document(&self) -> MapDocument {
        let mut data = json!({ "id": self.id, "positions": self.positions });
        if let Some(area) = self.area {
            data["area"] = json!(area);
        }
        MapDocument::new(DocumentClass::Aoi, data)
    }
}

fn decode_error(class: DocumentClass, e: serde_json::Error) -> MapError {
    MapError::Decode { class: class.as_str(), reason: e.to_string() }
}
