//! GeoJSON feature constructors.
//!
//! Positions are always `[longitude, latitude]`.  Each feature carries its
//! integer id twice: as the GeoJSON `id` member and as an `id` property,
//! because the client reads the property.

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use rp_core::{AoiId, LaneType};

/// A line-string feature for a lane (or a road represented by one lane).
pub fn lane_feature(id: i32, lane_type: LaneType, coordinates: Vec<Vec<f64>>) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), json!(id));
    properties.insert("type".to_string(), json!(lane_type.tag()));
    Feature {
        bbox:            None,
        geometry:        Some(Geometry::new(Value::LineString(coordinates))),
        id:              Some(Id::Number(id.into())),
        properties:      Some(properties),
        foreign_members: None,
    }
}

/// A single-ring polygon feature for an area of interest.
///
/// The ring is closed (last position equal to the first) if the stored
/// boundary was open.
pub fn aoi_feature(id: AoiId, mut ring: Vec<Vec<f64>>) -> Feature {
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if first != last {
            let first = first.clone();
            ring.push(first);
        }
    }
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), json!(id.0));
    Feature {
        bbox:            None,
        geometry:        Some(Geometry::new(Value::Polygon(vec![ring]))),
        id:              Some(Id::Number(id.0.into())),
        properties:      Some(properties),
        foreign_members: None,
    }
}

pub fn feature_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection { bbox: None, features, foreign_members: None }
}
