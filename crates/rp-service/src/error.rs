//! Service error type and its coarse classification.

use thiserror::Error;

use rp_core::CoreError;
use rp_feature::FeatureError;
use rp_map::MapError;
use rp_proj::ProjError;
use rp_status::StatusError;

/// Coarse error class, for the transport layer to map onto a status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No metadata row for the requested simulation.
    NotFound,
    /// The simulation exists but lacks a field the operation needs.
    PreconditionUnavailable,
    /// The store failed or returned data it should not have.
    UpstreamQuery,
    /// Unknown CRS or failed coordinate transform.
    Projection,
    /// Malformed map reference, request parameter, or configuration.
    Format,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("simulation {0:?} not found")]
    NotFound(String),

    #[error("simulation {name:?} has no road status information ({missing} missing)")]
    RoadStatusUnavailable { name: String, missing: &'static str },

    #[error("simulation {name:?} has unsupported data version {version}")]
    UnsupportedVersion { name: String, version: i32 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Projection(#[from] ProjError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

impl From<FeatureError> for ServiceError {
    fn from(e: FeatureError) -> Self {
        match e {
            FeatureError::Map(e) => ServiceError::Map(e),
            FeatureError::Projection(e) => ServiceError::Projection(e),
        }
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::RoadStatusUnavailable { .. } => ErrorKind::PreconditionUnavailable,
            ServiceError::UnsupportedVersion { .. }
            | ServiceError::InvalidParameter(_)
            | ServiceError::Config(_)
            | ServiceError::Core(_) => ErrorKind::Format,
            ServiceError::Map(_) => ErrorKind::UpstreamQuery,
            ServiceError::Projection(_) => ErrorKind::Projection,
            ServiceError::Status(StatusError::InvalidRange(_)) => ErrorKind::Format,
            ServiceError::Status(_) => ErrorKind::UpstreamQuery,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
