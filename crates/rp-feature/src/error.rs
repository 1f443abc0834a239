//! Feature-extraction error type.

use thiserror::Error;

use rp_map::MapError;
use rp_proj::ProjError;

/// Errors produced by `rp-feature`.  Both are terminal: no partial feature
/// list is ever returned alongside one.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Projection(#[from] ProjError),
}

pub type FeatureResult<T> = Result<T, FeatureError>;
