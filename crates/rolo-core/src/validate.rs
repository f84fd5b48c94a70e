//! Record validators — required-field checks shared by the entity shapes.
//!
//! These run in the action handlers before a write is attempted, and again
//! inside the storage backend before the SQL is issued. The database schema
//! enforces the same constraints a third time (NOT NULL, UNIQUE), so a race
//! between a handler pre-check and the insert still surfaces cleanly.

use std::fmt;

use crate::Error;

/// Accumulated per-field validation failures, in prompt order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
  errors: Vec<(&'static str, &'static str)>,
}

impl FieldErrors {
  /// Record a failure for `field`.
  pub fn push(&mut self, field: &'static str, reason: &'static str) {
    self.errors.push((field, reason));
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
    self.errors.iter().copied()
  }

  /// `Ok(())` when no failures were recorded, otherwise [`Error::Invalid`].
  pub fn into_result(self) -> Result<(), Error> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(Error::Invalid(self))
    }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, (field, reason)) in self.errors.iter().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      write!(f, "  {field}: {reason}")?;
    }
    Ok(())
  }
}

/// Record a failure unless `value` contains something other than whitespace.
pub fn require(errors: &mut FieldErrors, field: &'static str, value: &str) {
  if value.trim().is_empty() {
    errors.push(field, "must not be blank");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_is_ok() {
    assert!(FieldErrors::default().into_result().is_ok());
  }

  #[test]
  fn display_lists_one_field_per_line() {
    let mut errors = FieldErrors::default();
    require(&mut errors, "username", "");
    require(&mut errors, "password", "   ");
    let rendered = errors.to_string();
    assert_eq!(
      rendered,
      "  username: must not be blank\n  password: must not be blank"
    );
  }

  #[test]
  fn require_accepts_non_blank() {
    let mut errors = FieldErrors::default();
    require(&mut errors, "username", "alice");
    assert!(errors.is_empty());
  }
}
