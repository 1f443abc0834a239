//! Map-subsystem error type.

use thiserror::Error;

use rp_core::MapReference;

/// Errors produced by `rp-map`.
#[derive(Debug, Error)]
pub enum MapError {
    /// The store could not be reached or rejected the query.
    #[error("map query failed: {0}")]
    Query(String),

    /// The map has no header record, or the header lacks a projection.
    #[error("map {0} has no header with a projection")]
    HeaderMissing(MapReference),

    /// A stored document does not have the expected shape.
    #[error("malformed {class} document: {reason}")]
    Decode { class: &'static str, reason: String },

    /// More than one metadata row for a single simulation name.
    #[error("duplicate metadata records for {0:?}")]
    DuplicateRecords(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type MapResult<T> = Result<T, MapError>;
