//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use rusqlite::types::Value;

use rolo_core::{
  contact::{Contact, ContactPatch, NewContact},
  store::DirectoryStore,
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::{RawContact, RawUser, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolo address book backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// True when `err` wraps SQLITE_CONSTRAINT_UNIQUE.
fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

/// True when `err` wraps SQLITE_CONSTRAINT_FOREIGNKEY.
fn is_fk_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
  )
}

fn read_contact_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContact> {
  Ok(RawContact {
    id:         row.get(0)?,
    first_name: row.get(1)?,
    last_name:  row.get(2)?,
    phone:      row.get(3)?,
    email:      row.get(4)?,
    owner_id:   row.get(5)?,
    created_at: row.get(6)?,
    updated_at: row.get(7)?,
  })
}

const CONTACT_COLUMNS: &str =
  "id, first_name, last_name, phone, email, owner_id, created_at, updated_at";

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
    let name = username.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, username, password, created_at, updated_at
               FROM users WHERE username = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawUser {
                  id:         row.get(0)?,
                  username:   row.get(1)?,
                  password:   row.get(2)?,
                  created_at: row.get(3)?,
                  updated_at: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn create_user(&self, input: NewUser) -> Result<User> {
    input.validate()?;

    let now = Utc::now();
    let now_str = encode_dt(now);
    let username = input.username.clone();
    let password = input.password.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (username, password, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![username, password, now_str, now_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          Error::UsernameTaken(input.username.clone())
        } else {
          Error::Database(e)
        }
      })?;

    Ok(User {
      id,
      username: input.username,
      password: input.password,
      created_at: now,
      updated_at: now,
    })
  }

  // ── Contacts — always owner-scoped ────────────────────────────────────────

  async fn list_contacts(&self, owner_id: i64) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts
           WHERE owner_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_id], read_contact_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn find_contact(&self, owner_id: i64, contact_id: i64) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts
                 WHERE id = ?1 AND owner_id = ?2"
              ),
              rusqlite::params![contact_id, owner_id],
              read_contact_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn create_contact(&self, owner_id: i64, input: NewContact) -> Result<Contact> {
    input.validate()?;

    let now = Utc::now();
    let now_str = encode_dt(now);
    let fields = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts
             (first_name, last_name, phone, email, owner_id, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            fields.first_name,
            fields.last_name,
            fields.phone,
            fields.email,
            owner_id,
            now_str,
            now_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| {
        if is_fk_violation(&e) {
          Error::UserNotFound(owner_id)
        } else {
          Error::Database(e)
        }
      })?;

    Ok(Contact {
      id,
      first_name: input.first_name,
      last_name: input.last_name,
      phone: input.phone,
      email: input.email,
      owner_id,
      created_at: now,
      updated_at: now,
    })
  }

  async fn update_contact(
    &self,
    owner_id: i64,
    contact_id: i64,
    patch: ContactPatch,
  ) -> Result<Contact> {
    patch.validate()?;

    let updated_at = encode_dt(Utc::now());

    let rows = self
      .conn
      .call(move |conn| {
        // SET list built from whichever fields the patch names; the update is
        // issued even for an empty patch so updated_at always moves.
        let mut sets: Vec<&'static str> = Vec::new();
        let mut args: Vec<Value> = Vec::new();

        if let Some(v) = patch.first_name {
          sets.push("first_name = ?");
          args.push(Value::Text(v));
        }
        if let Some(v) = patch.last_name {
          sets.push("last_name = ?");
          args.push(Value::Text(v));
        }
        if let Some(v) = patch.phone {
          sets.push("phone = ?");
          args.push(Value::Text(v));
        }
        if let Some(v) = patch.email {
          sets.push("email = ?");
          args.push(Value::Text(v));
        }
        sets.push("updated_at = ?");
        args.push(Value::Text(updated_at));

        args.push(Value::Integer(contact_id));
        args.push(Value::Integer(owner_id));

        let sql = format!(
          "UPDATE contacts SET {} WHERE id = ? AND owner_id = ?",
          sets.join(", ")
        );
        Ok(conn.execute(&sql, rusqlite::params_from_iter(args))?)
      })
      .await?;

    if rows == 0 {
      return Err(Error::ContactNotFound(contact_id));
    }

    self
      .find_contact(owner_id, contact_id)
      .await?
      .ok_or(Error::ContactNotFound(contact_id))
  }

  async fn delete_contact(&self, owner_id: i64, contact_id: i64) -> Result<Contact> {
    let contact = self
      .find_contact(owner_id, contact_id)
      .await?
      .ok_or(Error::ContactNotFound(contact_id))?;

    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE id = ?1 AND owner_id = ?2",
          rusqlite::params![contact_id, owner_id],
        )?)
      })
      .await?;

    if rows == 0 {
      return Err(Error::ContactNotFound(contact_id));
    }

    Ok(contact)
  }
}
