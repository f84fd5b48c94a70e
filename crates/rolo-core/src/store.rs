//! The `DirectoryStore` trait — the persistence gateway contract.
//!
//! The trait is implemented by storage backends (e.g. `rolo-store-sqlite`).
//! The session controller depends on this abstraction, not on any concrete
//! backend. Every contact operation takes the owner id explicitly; nothing at
//! this layer knows about the current session.

use std::future::Future;

use crate::{
  contact::{Contact, ContactPatch, NewContact},
  user::{NewUser, User},
};

/// Abstraction over an address-book storage backend.
///
/// Required-field and uniqueness constraints are enforced here (the record
/// validators duplicate the field checks before calling in). All methods
/// return `Send` futures so the trait can be used on multi-threaded runtimes.
pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Look up an account by exact username. Returns `None` if absent.
  fn find_user_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Validate and insert a new account. The store assigns `id` and the
  /// timestamps. Fails if the username is already taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  // ── Contacts — always owner-scoped ────────────────────────────────────

  /// All contacts owned by `owner_id`, in creation order.
  fn list_contacts(
    &self,
    owner_id: i64,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// One contact by id, only if owned by `owner_id`. Returns `None` for
  /// unknown ids and for contacts owned by someone else alike.
  fn find_contact(
    &self,
    owner_id: i64,
    contact_id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Validate and insert a new contact owned by `owner_id`.
  fn create_contact(
    &self,
    owner_id: i64,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Apply a partial patch to an owned contact. Unpatched fields keep their
  /// stored values; `updated_at` moves even for an empty patch.
  fn update_contact(
    &self,
    owner_id: i64,
    contact_id: i64,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Delete an owned contact and return the removed record.
  fn delete_contact(
    &self,
    owner_id: i64,
    contact_id: i64,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;
}
