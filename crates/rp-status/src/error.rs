use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatusError {
    /// The backing store could not be reached or rejected the query.
    #[error("step query failed: {0}")]
    Query(String),

    #[error("invalid step range: {0}")]
    InvalidRange(String),

    #[error("step record parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StatusResult<T> = Result<T, StatusError>;
