//! Error type for `rolo-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rolo_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The `users.username` UNIQUE constraint fired on insert.
  #[error("username {0:?} is already taken")]
  UsernameTaken(String),

  /// A contact insert referenced an owner that no longer exists.
  #[error("user not found: {0}")]
  UserNotFound(i64),

  /// Update/delete target missing, or owned by a different user.
  #[error("contact not found: {0}")]
  ContactNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
