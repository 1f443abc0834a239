//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enum via
//! `#[from]`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("bad map path format {0:?}: expected \"database.collection\"")]
    MapReferenceFormat(String),

    #[error("invalid bounding box: {0}")]
    InvalidBounds(String),
}

/// Shorthand result type for `rp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
