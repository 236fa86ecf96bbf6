use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod automation;
pub mod bookings;
pub mod calendar;
pub mod main;
pub mod pricing_rules;
pub mod properties;
pub mod rate_plans;

/// Result type returned by all service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The user's role does not grant the required capability.
    #[error("unauthorized")]
    Unauthorized,
    /// The requested record does not exist for the user's property.
    #[error("not found")]
    NotFound,
    /// A uniqueness constraint rejected the write.
    #[error("already exists")]
    Conflict,
    /// The submitted form failed validation.
    #[error("{0}")]
    Form(String),
    /// Any other persistence failure.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}
