use thiserror::Error;

/// Generic error type used by service layer functions.
///
/// Mapping these onto transport status codes is the caller's concern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found or is not visible to the caller.
    #[error("not found")]
    NotFound,
    /// The caller may not perform the operation on this entity.
    #[error("forbidden")]
    Forbidden,
    /// Required input was missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The write would duplicate an existing record.
    #[error("conflict: {0}")]
    Conflict(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
