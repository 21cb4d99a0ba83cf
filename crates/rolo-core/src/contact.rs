//! Contact types, the single entity managed by Rolo.
//!
//! A [`Contact`] is what the store hands back. Callers never build one
//! directly: they submit a [`NewContact`] to create a record and a
//! [`ContactPatch`] to change one, and the store assigns the identifier and
//! both timestamps.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Identifier ──────────────────────────────────────────────────────────────

/// The opaque identifier assigned to a contact by the store.
///
/// Parsing is the identifier-validity check: anything that is not a UUID is
/// rejected with [`Error::InvalidIdentifier`] before a store is consulted.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
  /// Mint a fresh random identifier. Only stores should call this.
  pub fn new_v4() -> Self { Self(Uuid::new_v4()) }
}

impl From<Uuid> for ContactId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl FromStr for ContactId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    // Only the hyphenated (36) and simple (32) forms; `uuid` also takes
    // braced and `urn:uuid:` input.
    if !matches!(s.len(), 32 | 36) {
      return Err(Error::InvalidIdentifier(s.to_owned()));
    }
    Uuid::parse_str(s)
      .map(Self)
      .map_err(|_| Error::InvalidIdentifier(s.to_owned()))
  }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0.hyphenated(), f)
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:             ContactId,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub favorite_color: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub birthday:       Option<NaiveDate>,
  #[serde(default)]
  pub tags:           Vec<String>,
  /// Set once by the store; never changes.
  pub created_at:     DateTime<Utc>,
  /// Equal to `created_at` on creation, refreshed by every update.
  pub last_modified:  DateTime<Utc>,
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::create_contact`].
/// The identifier and timestamps are always set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  pub phone:          Option<String>,
  pub favorite_color: Option<String>,
  pub birthday:       Option<NaiveDate>,
  pub tags:           Vec<String>,
}

impl NewContact {
  /// Convenience constructor with all optional fields unset.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      first_name:     first_name.into(),
      last_name:      last_name.into(),
      email:          email.into(),
      phone:          None,
      favorite_color: None,
      birthday:       None,
      tags:           Vec::new(),
    }
  }
}

// ─── ContactPatch ────────────────────────────────────────────────────────────

/// A partial update. Outer `None` leaves a field untouched; for the optional
/// fields an inner `None` clears the stored value.
///
/// A patch must set at least one field; see [`ContactPatch::is_empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
  pub first_name:     Option<String>,
  pub last_name:      Option<String>,
  pub email:          Option<String>,
  pub phone:          Option<Option<String>>,
  pub favorite_color: Option<Option<String>>,
  pub birthday:       Option<Option<NaiveDate>>,
  pub tags:           Option<Vec<String>>,
}

impl ContactPatch {
  /// `true` when no field is set.
  pub fn is_empty(&self) -> bool {
    self.first_name.is_none()
      && self.last_name.is_none()
      && self.email.is_none()
      && self.phone.is_none()
      && self.favorite_color.is_none()
      && self.birthday.is_none()
      && self.tags.is_none()
  }
}
