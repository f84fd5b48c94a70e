//! Registration, login and logout.

use std::io::{BufRead, Write};

use rolo_core::{store::DirectoryStore as _, user::{NewUser, User}};
use rolo_store_sqlite::SqliteStore;

use crate::{
  console::{Console, Input},
  handlers::report_failure,
  session::{Flow, SessionState},
};

/// Create an account. Never logs the new user in; registration always
/// returns to the unauthenticated menu.
pub async fn register<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
) -> anyhow::Result<Flow> {
  let Input::Line(username) = console.prompt("Username")? else {
    return Ok(Flow::Ended);
  };
  let Input::Line(password) = console.prompt("Password")? else {
    return Ok(Flow::Ended);
  };

  // Pre-check for a friendlier message; a race with another writer still
  // surfaces as UsernameTaken from the insert below.
  if store.find_user_by_username(&username).await?.is_some() {
    console.say(&format!("Username {username:?} is already taken."))?;
    return Ok(Flow::Continue(SessionState::Unauthenticated));
  }

  let input = NewUser { username, password };
  if let Err(rolo_core::Error::Invalid(fields)) = input.validate() {
    console.say("Could not register:")?;
    console.say(&fields.to_string())?;
    return Ok(Flow::Continue(SessionState::Unauthenticated));
  }

  match store.create_user(input).await {
    Ok(user) => {
      tracing::debug!(user = %user.username, "registered");
      console.say(&format!(
        "Account {:?} created. You can now log in.",
        user.username
      ))?;
    }
    Err(err) => report_failure(console, err)?,
  }
  Ok(Flow::Continue(SessionState::Unauthenticated))
}

/// Authenticate. The failure message never says whether the username or the
/// password was wrong.
pub async fn login<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
) -> anyhow::Result<Flow> {
  let Input::Line(username) = console.prompt("Username")? else {
    return Ok(Flow::Ended);
  };
  let Input::Line(password) = console.prompt("Password")? else {
    return Ok(Flow::Ended);
  };

  match store.find_user_by_username(&username).await? {
    Some(user) if user.password_matches(&password) => {
      tracing::debug!(user = %user.username, "login");
      console.say(&format!("Welcome back, {}.", user.username))?;
      Ok(Flow::Continue(SessionState::Authenticated(user)))
    }
    _ => {
      console.say("Invalid username or password.")?;
      Ok(Flow::Continue(SessionState::Unauthenticated))
    }
  }
}

/// Drop the in-memory session reference. Nothing is persisted.
pub fn logout<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  user: User,
) -> anyhow::Result<Flow> {
  tracing::debug!(user = %user.username, "logout");
  console.say(&format!("Logged out {}.", user.username))?;
  Ok(Flow::Continue(SessionState::Unauthenticated))
}
