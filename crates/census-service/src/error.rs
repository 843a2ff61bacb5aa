//! Service error type.

use thiserror::Error;
use uuid::Uuid;

/// An error returned by a service operation.
///
/// A missing entity on a read is not an error; lookups return `None`. Only
/// writes that target a missing entity fail with [`ServiceError::NotFound`].
#[derive(Debug, Error)]
pub enum ServiceError {
  /// A required top-level argument was absent.
  #[error("{0} must not be null")]
  NullInput(&'static str),

  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// A request field broke a validation rule; carries the first one.
  #[error("validation failed: {0}")]
  ValidationFailed(String),

  #[error("country name {0:?} already exists")]
  DuplicateName(String),

  #[error("person {0} does not exist")]
  NotFound(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<census_core::Error> for ServiceError {
  fn from(e: census_core::Error) -> Self {
    match e {
      census_core::Error::Validation(m) => ServiceError::ValidationFailed(m),
    }
  }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Box a collaborator failure.
pub(crate) fn store_error<E>(e: E) -> ServiceError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ServiceError::Store(Box::new(e))
}
