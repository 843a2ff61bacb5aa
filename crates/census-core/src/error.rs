//! Error types for `census-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A request failed field validation; carries the first violated rule.
  #[error("{0}")]
  Validation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
