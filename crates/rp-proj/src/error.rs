//! Projection error type.

use thiserror::Error;

/// Errors produced by `rp-proj`.
#[derive(Debug, Error)]
pub enum ProjError {
    /// The CRS identifier is unknown or malformed.
    #[error("cannot set up projection for {crs:?}: {reason}")]
    Setup { crs: String, reason: String },

    /// A single coordinate failed to transform.
    #[error("cannot transform ({x}, {y}) from {from} to {to}: {reason}")]
    Evaluation {
        from:   String,
        to:     String,
        x:      f64,
        y:      f64,
        reason: String,
    },
}

pub type ProjResult<T> = Result<T, ProjError>;
