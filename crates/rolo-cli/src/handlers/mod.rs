//! Action handlers — one module per menu concern.

pub mod auth;
pub mod contact;

use std::io::{BufRead, Write};

use rolo_store_sqlite::Error as StoreError;

use crate::console::Console;

/// Print recoverable store failures; propagate everything else.
///
/// Validation and uniqueness errors are reported once with their field-level
/// reasons and never retried. Any other store fault (connection loss etc.)
/// bubbles out of the loop and terminates the process.
pub(crate) fn report_failure<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  err: StoreError,
) -> anyhow::Result<()> {
  match err {
    StoreError::Core(rolo_core::Error::Invalid(fields)) => {
      console.say("Could not save:")?;
      console.say(&fields.to_string())?;
    }
    StoreError::UsernameTaken(name) => {
      console.say(&format!("Username {name:?} is already taken."))?;
    }
    StoreError::ContactNotFound(_) => {
      console.say("Invalid selection.")?;
    }
    other => return Err(other.into()),
  }
  Ok(())
}
