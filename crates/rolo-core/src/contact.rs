//! Contact — one address-book entry, always owned by exactly one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error,
  validate::{FieldErrors, require},
};

/// A persisted contact. Readable and writable only through queries scoped by
/// `owner_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  String,
  pub phone:      String,
  pub email:      String,
  pub owner_id:   i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Contact {
  /// Case-insensitive substring match across all four scalar fields.
  ///
  /// This is the in-memory filter behind contact search: a single free-text
  /// term, not field-qualified.
  pub fn matches(&self, term: &str) -> bool {
    let needle = term.to_lowercase();
    [&self.first_name, &self.last_name, &self.phone, &self.email]
      .into_iter()
      .any(|field| field.to_lowercase().contains(&needle))
  }
}

/// Input shape for contact creation. All four fields are mandatory.
#[derive(Debug, Clone)]
pub struct NewContact {
  pub first_name: String,
  pub last_name:  String,
  pub phone:      String,
  pub email:      String,
}

impl NewContact {
  pub fn validate(&self) -> Result<(), Error> {
    let mut errors = FieldErrors::default();
    require(&mut errors, "first_name", &self.first_name);
    require(&mut errors, "last_name", &self.last_name);
    require(&mut errors, "phone", &self.phone);
    require(&mut errors, "email", &self.email);
    errors.into_result()
  }
}

/// Partial update for a contact. `None` fields retain their stored value.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub phone:      Option<String>,
  pub email:      Option<String>,
}

impl ContactPatch {
  /// True when no field is being changed. An empty patch is still a valid
  /// update; it only moves `updated_at`.
  pub fn is_empty(&self) -> bool {
    self.first_name.is_none()
      && self.last_name.is_none()
      && self.phone.is_none()
      && self.email.is_none()
  }

  /// A field that is present must not be blanked out.
  pub fn validate(&self) -> Result<(), Error> {
    let mut errors = FieldErrors::default();
    if let Some(v) = &self.first_name {
      require(&mut errors, "first_name", v);
    }
    if let Some(v) = &self.last_name {
      require(&mut errors, "last_name", v);
    }
    if let Some(v) = &self.phone {
      require(&mut errors, "phone", v);
    }
    if let Some(v) = &self.email {
      require(&mut errors, "email", v);
    }
    errors.into_result()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn jane() -> Contact {
    Contact {
      id:         1,
      first_name: "Jane".into(),
      last_name:  "Doe".into(),
      phone:      "555-1234".into(),
      email:      "jane@example.com".into(),
      owner_id:   1,
      created_at: Utc::now(),
      updated_at: Utc::now(),
    }
  }

  #[test]
  fn matches_each_field_case_insensitively() {
    let c = jane();
    assert!(c.matches("jane"));
    assert!(c.matches("DOE"));
    assert!(c.matches("555-12"));
    assert!(c.matches("example.com"));
  }

  #[test]
  fn matches_rejects_absent_term() {
    assert!(!jane().matches("bob"));
  }

  #[test]
  fn empty_term_matches_everything() {
    assert!(jane().matches(""));
  }

  #[test]
  fn validate_flags_every_blank_field() {
    let blank = NewContact {
      first_name: String::new(),
      last_name:  String::new(),
      phone:      String::new(),
      email:      String::new(),
    };
    let Error::Invalid(fields) = blank.validate().unwrap_err();
    assert_eq!(fields.iter().count(), 4);
  }

  #[test]
  fn patch_default_is_empty_and_valid() {
    let patch = ContactPatch::default();
    assert!(patch.is_empty());
    assert!(patch.validate().is_ok());
  }

  #[test]
  fn patch_rejects_blanking_a_field() {
    let patch = ContactPatch { phone: Some("  ".into()), ..Default::default() };
    assert!(patch.validate().is_err());
  }
}
