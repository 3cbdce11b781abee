use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

/// Error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No signed-in identity is available for the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted form data was rejected before any I/O.
    #[error("{0}")]
    Form(String),
    /// A value violated a domain constraint.
    #[error("{0}")]
    TypeConstraint(String),
    /// The backing store could not be reached or failed.
    #[error("service unavailable")]
    Unavailable,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Log a repository failure and report the store as unavailable.
pub(crate) fn from_repository(context: &str, error: RepositoryError) -> ServiceError {
    log::error!("{context}: {error}");
    ServiceError::Unavailable
}
