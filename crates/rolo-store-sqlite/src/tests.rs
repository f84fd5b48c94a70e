//! Integration tests for `SqliteStore` against an in-memory database.

use rolo_core::{
  contact::{ContactPatch, NewContact},
  store::DirectoryStore,
  user::NewUser,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn alice() -> NewUser {
  NewUser { username: "alice".into(), password: "pw1".into() }
}

fn jane() -> NewContact {
  NewContact {
    first_name: "Jane".into(),
    last_name:  "Doe".into(),
    phone:      "555-1234".into(),
    email:      "jane@example.com".into(),
  }
}

fn bob_contact() -> NewContact {
  NewContact {
    first_name: "Bob".into(),
    last_name:  "Jones".into(),
    phone:      "555-9999".into(),
    email:      "bob@work.example.org".into(),
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_user() {
  let s = store().await;

  let user = s.create_user(alice()).await.unwrap();
  assert_eq!(user.username, "alice");
  assert_eq!(user.password, "pw1");

  let fetched = s.find_user_by_username("alice").await.unwrap().unwrap();
  assert_eq!(fetched.id, user.id);
  assert_eq!(fetched.username, "alice");
  assert!(fetched.password_matches("pw1"));
}

#[tokio::test]
async fn find_unknown_user_returns_none() {
  let s = store().await;
  assert!(s.find_user_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn username_lookup_is_case_sensitive() {
  let s = store().await;
  s.create_user(alice()).await.unwrap();
  assert!(s.find_user_by_username("Alice").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_rejected() {
  let s = store().await;
  let first = s.create_user(alice()).await.unwrap();

  // Any password; only the username collides.
  let err = s
    .create_user(NewUser { username: "alice".into(), password: "other".into() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UsernameTaken(ref name) if name == "alice"));

  // The original record is untouched; no second user was created.
  let fetched = s.find_user_by_username("alice").await.unwrap().unwrap();
  assert_eq!(fetched.id, first.id);
  assert!(fetched.password_matches("pw1"));
}

#[tokio::test]
async fn blank_user_fields_rejected() {
  let s = store().await;
  let err = s
    .create_user(NewUser { username: "  ".into(), password: "".into() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(rolo_core::Error::Invalid(_))));
}

// ─── Contact creation & listing ──────────────────────────────────────────────

#[tokio::test]
async fn create_and_list_contacts_in_creation_order() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();

  let first = s.create_contact(user.id, jane()).await.unwrap();
  let second = s.create_contact(user.id, bob_contact()).await.unwrap();

  let all = s.list_contacts(user.id).await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].id, first.id);
  assert_eq!(all[1].id, second.id);
  assert_eq!(all[0].first_name, "Jane");
  assert_eq!(all[0].owner_id, user.id);
}

#[tokio::test]
async fn blank_contact_fields_rejected() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();

  let mut input = jane();
  input.phone = String::new();
  input.email = "   ".into();

  let err = s.create_contact(user.id, input).await.unwrap_err();
  let Error::Core(rolo_core::Error::Invalid(fields)) = err else {
    panic!("expected validation failure");
  };
  let named: Vec<_> = fields.iter().map(|(f, _)| f).collect();
  assert_eq!(named, ["phone", "email"]);
}

#[tokio::test]
async fn find_contact_missing_returns_none() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();
  assert!(s.find_contact(user.id, 42).await.unwrap().is_none());
}

// ─── Owner scoping ───────────────────────────────────────────────────────────

#[tokio::test]
async fn contacts_are_invisible_to_other_owners() {
  let s = store().await;
  let a = s.create_user(alice()).await.unwrap();
  let b = s
    .create_user(NewUser { username: "bob".into(), password: "pw2".into() })
    .await
    .unwrap();

  let contact = s.create_contact(a.id, jane()).await.unwrap();

  // B sees nothing, even addressing A's contact id directly.
  assert!(s.list_contacts(b.id).await.unwrap().is_empty());
  assert!(s.find_contact(b.id, contact.id).await.unwrap().is_none());

  let err = s
    .update_contact(b.id, contact.id, ContactPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ContactNotFound(id) if id == contact.id));

  let err = s.delete_contact(b.id, contact.id).await.unwrap_err();
  assert!(matches!(err, Error::ContactNotFound(id) if id == contact.id));

  // A's record is still intact.
  let still = s.find_contact(a.id, contact.id).await.unwrap().unwrap();
  assert_eq!(still, contact);
}

// ─── Partial updates ─────────────────────────────────────────────────────────

#[tokio::test]
async fn patch_updates_only_named_fields() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();
  let contact = s.create_contact(user.id, jane()).await.unwrap();

  let patch = ContactPatch { phone: Some("555-0000".into()), ..Default::default() };
  let updated = s.update_contact(user.id, contact.id, patch).await.unwrap();

  assert_eq!(updated.phone, "555-0000");
  assert_eq!(updated.first_name, contact.first_name);
  assert_eq!(updated.last_name, contact.last_name);
  assert_eq!(updated.email, contact.email);
  assert_eq!(updated.created_at, contact.created_at);
}

#[tokio::test]
async fn empty_patch_touches_only_updated_at() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();
  let contact = s.create_contact(user.id, jane()).await.unwrap();

  let updated = s
    .update_contact(user.id, contact.id, ContactPatch::default())
    .await
    .unwrap();

  assert_eq!(updated.first_name, contact.first_name);
  assert_eq!(updated.last_name, contact.last_name);
  assert_eq!(updated.phone, contact.phone);
  assert_eq!(updated.email, contact.email);
  assert_eq!(updated.created_at, contact.created_at);
  assert!(updated.updated_at >= contact.updated_at);
}

#[tokio::test]
async fn patch_on_unknown_contact_errors() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();

  let err = s
    .update_contact(user.id, 99, ContactPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ContactNotFound(99)));
}

// ─── Deletion ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_contact_from_list() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();
  let keep = s.create_contact(user.id, jane()).await.unwrap();
  let gone = s.create_contact(user.id, bob_contact()).await.unwrap();

  let removed = s.delete_contact(user.id, gone.id).await.unwrap();
  assert_eq!(removed.id, gone.id);
  assert_eq!(removed.first_name, "Bob");

  let remaining = s.list_contacts(user.id).await.unwrap();
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0].id, keep.id);
}

#[tokio::test]
async fn delete_twice_fails_second_time() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();
  let contact = s.create_contact(user.id, jane()).await.unwrap();

  s.delete_contact(user.id, contact.id).await.unwrap();

  let err = s.delete_contact(user.id, contact.id).await.unwrap_err();
  assert!(matches!(err, Error::ContactNotFound(id) if id == contact.id));
}

// ─── Search filter (in-memory, over listed contacts) ─────────────────────────

#[tokio::test]
async fn search_term_present_only_in_email_matches_that_contact() {
  let s = store().await;
  let user = s.create_user(alice()).await.unwrap();
  s.create_contact(user.id, jane()).await.unwrap();
  s.create_contact(user.id, bob_contact()).await.unwrap();

  let contacts = s.list_contacts(user.id).await.unwrap();
  let hits: Vec<_> = contacts.iter().filter(|c| c.matches("example.com")).collect();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].first_name, "Jane");

  let none: Vec<_> = contacts.iter().filter(|c| c.matches("zzz")).collect();
  assert!(none.is_empty());
}
