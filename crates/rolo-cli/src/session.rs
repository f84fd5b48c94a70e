//! The session controller: one explicit loop holding the authentication
//! state, dispatching each trimmed input line to an action handler.
//!
//! Every handler returns the next state (or signals end-of-input), so control
//! always comes back here; the only state in the system is the one
//! `SessionState` variable below.

use std::io::{BufRead, Write};

use rolo_core::user::User;
use rolo_store_sqlite::SqliteStore;

use crate::{
  console::{Console, Input},
  handlers, render,
};

/// The two authentication states of a running session.
#[derive(Debug, Clone)]
pub enum SessionState {
  Unauthenticated,
  Authenticated(User),
}

/// Control signal returned by every action handler.
pub enum Flow {
  /// Re-enter the loop with this state.
  Continue(SessionState),
  /// The input stream ended mid-handler; stop the loop.
  Ended,
}

/// Run the menu loop until the input stream ends.
///
/// Recoverable failures (validation, invalid selection, bad credentials) are
/// reported by the handlers and never reach this function; anything else
/// propagates out and terminates the process.
pub async fn run<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
) -> anyhow::Result<()> {
  let mut state = SessionState::Unauthenticated;

  loop {
    render::menu(console, &state)?;
    let choice = match console.prompt("Choose an option")? {
      Input::Eof => break,
      Input::Line(line) => line,
    };
    state = match dispatch(console, store, state, &choice).await? {
      Flow::Continue(next) => next,
      Flow::Ended => break,
    };
  }

  console.say("Goodbye.")?;
  Ok(())
}

/// Static dispatch table: (state, trimmed choice) to handler, with an
/// "Invalid option." fallback that leaves the state unchanged.
async fn dispatch<R: BufRead, W: Write>(
  console: &mut Console<R, W>,
  store: &SqliteStore,
  state: SessionState,
  choice: &str,
) -> anyhow::Result<Flow> {
  match state {
    SessionState::Unauthenticated => match choice {
      "1" => handlers::auth::register(console, store).await,
      "2" => handlers::auth::login(console, store).await,
      _ => {
        console.say("Invalid option.")?;
        Ok(Flow::Continue(SessionState::Unauthenticated))
      }
    },
    SessionState::Authenticated(user) => match choice {
      "1" => handlers::contact::add(console, store, user).await,
      "2" => handlers::contact::view(console, store, user).await,
      "3" => handlers::contact::edit(console, store, user).await,
      "4" => handlers::contact::delete(console, store, user).await,
      "5" => handlers::contact::search(console, store, user).await,
      "6" => handlers::auth::logout(console, user),
      _ => {
        console.say("Invalid option.")?;
        Ok(Flow::Continue(SessionState::Authenticated(user)))
      }
    },
  }
}
