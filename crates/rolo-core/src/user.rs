//! User — the account that owns a contact list.
//!
//! Passwords are stored and compared as plain text. This mirrors the original
//! product behaviour and is explicitly insecure; hardening is out of scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error,
  validate::{FieldErrors, require},
};

/// A persisted account. `id` and the timestamps are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:         i64,
  pub username:   String,
  pub password:   String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Literal, case-sensitive comparison. No normalisation, no hashing.
  pub fn password_matches(&self, candidate: &str) -> bool {
    self.password == candidate
  }
}

/// Input shape for registration.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username: String,
  pub password: String,
}

impl NewUser {
  pub fn validate(&self) -> Result<(), Error> {
    let mut errors = FieldErrors::default();
    require(&mut errors, "username", &self.username);
    require(&mut errors, "password", &self.password);
    errors.into_result()
  }
}
