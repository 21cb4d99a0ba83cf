//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `rolo-store-sqlite`).
//! Higher layers (`rolo-api`, `rolo-server`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{Contact, ContactId, ContactPatch, NewContact};

/// Abstraction over a Rolo contact store backend.
///
/// Lookups by id return `Ok(None)` when no record matches; identifier format
/// is enforced earlier by parsing into a [`ContactId`]. Backends are expected
/// to make each single-record write atomic; no cross-call locking is done.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  /// Backend error. Must convert into the shared taxonomy so the HTTP layer
  /// can tell validation failures from storage failures.
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Return every contact, in insertion order.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a new contact. The store assigns the id and sets `created_at`
  /// and `last_modified` to the same instant.
  fn create_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Apply a partial update and refresh `last_modified`. Returns the updated
  /// record, or `None` if not found.
  fn update_contact(
    &self,
    id: ContactId,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Remove a contact and return its last state, or `None` if not found.
  fn delete_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;
}
