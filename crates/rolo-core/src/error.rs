//! Error types for `rolo-core`.

use thiserror::Error;

use crate::validate::FieldErrors;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more required fields failed validation.
  #[error("validation failed:\n{0}")]
  Invalid(FieldErrors),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
