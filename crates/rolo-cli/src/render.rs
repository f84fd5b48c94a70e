//! Fixed-layout rendering for menus and contact listings.

use std::io::{self, BufRead, Write};

use rolo_core::contact::{Contact, NewContact};

use crate::{console::Console, session::SessionState};

/// Render the menu for the current state.
pub fn menu<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  state: &SessionState,
) -> io::Result<()> {
  console.say("")?;
  match state {
    SessionState::Unauthenticated => {
      console.say("Welcome to Rolo")?;
      console.say("  1) Register")?;
      console.say("  2) Log in")?;
    }
    SessionState::Authenticated(user) => {
      console.say(&format!("Signed in as {}", user.username))?;
      console.say("  1) Add a contact")?;
      console.say("  2) View contacts")?;
      console.say("  3) Edit a contact")?;
      console.say("  4) Delete a contact")?;
      console.say("  5) Search contacts")?;
      console.say("  6) Log out")?;
    }
  }
  Ok(())
}

/// One compact line per contact, id first — the selection listing and the
/// refreshed list shown after a successful write.
pub fn contact_lines<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  contacts: &[Contact],
) -> io::Result<()> {
  for c in contacts {
    console.say(&format!(
      "  [{}] {} {}  {}  {}",
      c.id, c.first_name, c.last_name, c.phone, c.email
    ))?;
  }
  Ok(())
}

/// Full block per contact, every field included — the View and Search output.
pub fn contact_details<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  contacts: &[Contact],
) -> io::Result<()> {
  for c in contacts {
    console.say(&format!("Contact [{}]", c.id))?;
    console.say(&format!("  First name: {}", c.first_name))?;
    console.say(&format!("  Last name:  {}", c.last_name))?;
    console.say(&format!("  Phone:      {}", c.phone))?;
    console.say(&format!("  Email:      {}", c.email))?;
    console.say(&format!(
      "  Created:    {}",
      c.created_at.format("%Y-%m-%d %H:%M UTC")
    ))?;
    console.say(&format!(
      "  Updated:    {}",
      c.updated_at.format("%Y-%m-%d %H:%M UTC")
    ))?;
  }
  Ok(())
}

/// The review block shown before a new contact is saved.
pub fn draft<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  draft: &NewContact,
) -> io::Result<()> {
  console.say("Review new contact:")?;
  console.say(&format!("  1) First name: {}", draft.first_name))?;
  console.say(&format!("  2) Last name:  {}", draft.last_name))?;
  console.say(&format!("  3) Phone:      {}", draft.phone))?;
  console.say(&format!("  4) Email:      {}", draft.email))?;
  Ok(())
}
