//! `rolo` — a terminal address book.
//!
//! Register an account, log in, and manage a personal contact list. Contacts
//! live in a SQLite file; each account only ever sees its own records.
//!
//! # Usage
//!
//! ```
//! rolo --db ~/.local/share/rolo/rolo.db
//! ```

mod console;
mod handlers;
mod render;
mod session;


use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use console::Console;
use rolo_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rolo", about = "Terminal address book")]
struct Cli {
  /// Path to the SQLite database file.
  #[arg(long, env = "ROLO_DB", default_value = "rolo.db")]
  db: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing. Logs go to stderr so they never interleave with the
  // menu output on stdout.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let store = SqliteStore::open(&cli.db)
    .await
    .with_context(|| format!("failed to open store at {:?}", cli.db))?;
  tracing::info!(db = %cli.db.display(), "store opened");

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut console = Console::new(stdin.lock(), stdout.lock());

  session::run(&mut console, &store).await
}
