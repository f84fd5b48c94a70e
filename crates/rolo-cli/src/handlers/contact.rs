//! The five contact flows: add, view, edit, delete, search.
//!
//! Edit and delete share one selection protocol: list the owned contacts,
//! read an id, and retry from the listing on anything that does not resolve
//! to an owned contact. The `*` sentinel backs out of any multi-step flow.

use std::io::{self, BufRead, Write};

use rolo_core::{
  contact::{Contact, ContactPatch, NewContact},
  store::DirectoryStore as _,
  user::User,
};
use rolo_store_sqlite::SqliteStore;

use crate::{
  console::{Answer, Console, Input},
  handlers::report_failure,
  render,
  session::{Flow, SessionState},
};

fn stay(user: User) -> Flow {
  Flow::Continue(SessionState::Authenticated(user))
}

// ─── Add ─────────────────────────────────────────────────────────────────────

enum Draft {
  Collected(NewContact),
  Cancelled,
  Eof,
}

fn collect_draft<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
) -> io::Result<Draft> {
  console.say("New contact (enter * at any prompt to cancel):")?;

  let mut values: [String; 4] = Default::default();
  for (slot, label) in values
    .iter_mut()
    .zip(["First name", "Last name", "Phone", "Email"])
  {
    match console.prompt_cancellable(label)? {
      Answer::Value(v) => *slot = v,
      Answer::Cancelled => return Ok(Draft::Cancelled),
      Answer::Eof => return Ok(Draft::Eof),
    }
  }

  let [first_name, last_name, phone, email] = values;
  Ok(Draft::Collected(NewContact { first_name, last_name, phone, email }))
}

/// Prompt for which draft field to replace, then read the replacement.
/// Returns `true` on end-of-input.
fn edit_draft_field<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  draft: &mut NewContact,
) -> io::Result<bool> {
  let Input::Line(choice) = console.prompt("Field to edit (1-4)")? else {
    return Ok(true);
  };
  let (label, slot) = match choice.as_str() {
    "1" => ("First name", &mut draft.first_name),
    "2" => ("Last name", &mut draft.last_name),
    "3" => ("Phone", &mut draft.phone),
    "4" => ("Email", &mut draft.email),
    _ => {
      console.say("Invalid selection.")?;
      return Ok(false);
    }
  };
  let Input::Line(value) = console.prompt(label)? else {
    return Ok(true);
  };
  *slot = value;
  Ok(false)
}

pub async fn add<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
  user: User,
) -> anyhow::Result<Flow> {
  let mut draft = match collect_draft(console)? {
    Draft::Collected(d) => d,
    Draft::Cancelled => {
      console.say("Cancelled.")?;
      return Ok(stay(user));
    }
    Draft::Eof => return Ok(Flow::Ended),
  };

  // Review until the user saves or cancels.
  loop {
    render::draft(console, &draft)?;
    console.say("  1) Save  2) Edit a field  3) Cancel")?;
    let Input::Line(choice) = console.prompt("Choose an option")? else {
      return Ok(Flow::Ended);
    };
    match choice.as_str() {
      "1" => {
        if let Err(rolo_core::Error::Invalid(fields)) = draft.validate() {
          console.say("Could not save:")?;
          console.say(&fields.to_string())?;
          return Ok(stay(user));
        }
        match store.create_contact(user.id, draft).await {
          Ok(_) => {
            console.say("Contact saved.")?;
            let contacts = store.list_contacts(user.id).await?;
            render::contact_lines(console, &contacts)?;
          }
          Err(err) => report_failure(console, err)?,
        }
        return Ok(stay(user));
      }
      "2" => {
        if edit_draft_field(console, &mut draft)? {
          return Ok(Flow::Ended);
        }
      }
      "3" => {
        console.say("Cancelled.")?;
        return Ok(stay(user));
      }
      _ => console.say("Invalid option.")?,
    }
  }
}

// ─── View ────────────────────────────────────────────────────────────────────

pub async fn view<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
  user: User,
) -> anyhow::Result<Flow> {
  let contacts = store.list_contacts(user.id).await?;
  if contacts.is_empty() {
    console.say("No contacts yet.")?;
  } else {
    render::contact_details(console, &contacts)?;
  }
  Ok(stay(user))
}

// ─── Selection (shared by edit and delete) ───────────────────────────────────

enum Selection {
  Chosen(Contact),
  Aborted,
  Empty,
  Eof,
}

async fn select_contact<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
  owner_id: i64,
) -> anyhow::Result<Selection> {
  loop {
    let contacts = store.list_contacts(owner_id).await?;
    if contacts.is_empty() {
      console.say("No contacts yet.")?;
      return Ok(Selection::Empty);
    }
    render::contact_lines(console, &contacts)?;

    match console.prompt_cancellable("Contact id (* to cancel)")? {
      Answer::Eof => return Ok(Selection::Eof),
      Answer::Cancelled => {
        console.say("Cancelled.")?;
        return Ok(Selection::Aborted);
      }
      Answer::Value(raw) => {
        // Non-numeric input and unknown or non-owned ids retry alike.
        let found = match raw.parse::<i64>() {
          Ok(id) => store.find_contact(owner_id, id).await?,
          Err(_) => None,
        };
        match found {
          Some(contact) => return Ok(Selection::Chosen(contact)),
          None => console.say("Invalid selection.")?,
        }
      }
    }
  }
}

// ─── Edit ────────────────────────────────────────────────────────────────────

pub async fn edit<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
  user: User,
) -> anyhow::Result<Flow> {
  let contact = match select_contact(console, store, user.id).await? {
    Selection::Chosen(c) => c,
    Selection::Empty | Selection::Aborted => return Ok(stay(user)),
    Selection::Eof => return Ok(Flow::Ended),
  };

  console.say("New values (empty line keeps the current value, * cancels):")?;

  let mut patch = ContactPatch::default();
  let fields: [(&str, &String, fn(&mut ContactPatch, String)); 4] = [
    ("First name", &contact.first_name, |p, v| p.first_name = Some(v)),
    ("Last name", &contact.last_name, |p, v| p.last_name = Some(v)),
    ("Phone", &contact.phone, |p, v| p.phone = Some(v)),
    ("Email", &contact.email, |p, v| p.email = Some(v)),
  ];
  for (label, current, set) in fields {
    match console.prompt_cancellable(&format!("{label} [{current}]"))? {
      Answer::Value(v) if !v.is_empty() => set(&mut patch, v),
      Answer::Value(_) => {} // keep the stored value
      Answer::Cancelled => {
        console.say("Cancelled.")?;
        return Ok(stay(user));
      }
      Answer::Eof => return Ok(Flow::Ended),
    }
  }

  // Issued even when nothing changed, so updated_at reflects the edit.
  match store.update_contact(user.id, contact.id, patch).await {
    Ok(_) => {
      console.say("Contact updated.")?;
      let contacts = store.list_contacts(user.id).await?;
      render::contact_lines(console, &contacts)?;
    }
    Err(err) => report_failure(console, err)?,
  }
  Ok(stay(user))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

pub async fn delete<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
  user: User,
) -> anyhow::Result<Flow> {
  let contact = match select_contact(console, store, user.id).await? {
    Selection::Chosen(c) => c,
    Selection::Empty | Selection::Aborted => return Ok(stay(user)),
    Selection::Eof => return Ok(Flow::Ended),
  };

  match store.delete_contact(user.id, contact.id).await {
    Ok(removed) => {
      console.say(&format!(
        "Deleted {} {}.",
        removed.first_name, removed.last_name
      ))?;
      let contacts = store.list_contacts(user.id).await?;
      render::contact_lines(console, &contacts)?;
    }
    Err(err) => report_failure(console, err)?,
  }
  Ok(stay(user))
}

// ─── Search ──────────────────────────────────────────────────────────────────

pub async fn search<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
  user: User,
) -> anyhow::Result<Flow> {
  let term = match console.prompt_cancellable("Search term (* to cancel)")? {
    Answer::Value(t) => t,
    Answer::Cancelled => {
      console.say("Cancelled.")?;
      return Ok(stay(user));
    }
    Answer::Eof => return Ok(Flow::Ended),
  };

  let contacts = store.list_contacts(user.id).await?;
  let hits: Vec<Contact> =
    contacts.into_iter().filter(|c| c.matches(&term)).collect();

  if hits.is_empty() {
    console.say(&format!("No contacts found matching {term:?}."))?;
  } else {
    render::contact_details(console, &hits)?;
  }
  Ok(stay(user))
}
