//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed nanosecond fraction
//! and a `Z` suffix, so they sort lexicographically. Birthdays are stored as
//! `YYYY-MM-DD`, tags as a compact JSON array, ids as hyphenated lowercase
//! UUIDs.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rolo_core::{Contact, ContactId};
use uuid::Uuid;

use crate::{Error, Result};

// ─── ContactId ───────────────────────────────────────────────────────────────

pub fn encode_id(id: ContactId) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> {
  Ok(Uuid::parse_str(s)?.into())
}

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawContact::from_row`].
pub const CONTACT_COLUMNS: &str = "contact_id, first_name, last_name, email, \
                                   phone, favorite_color, birthday, tags, \
                                   created_at, last_modified";

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id:     String,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  pub phone:          Option<String>,
  pub favorite_color: Option<String>,
  pub birthday:       Option<String>,
  pub tags:           String,
  pub created_at:     String,
  pub last_modified:  String,
}

impl RawContact {
  /// Read a row selected (or returned) with [`CONTACT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id:     row.get(0)?,
      first_name:     row.get(1)?,
      last_name:      row.get(2)?,
      email:          row.get(3)?,
      phone:          row.get(4)?,
      favorite_color: row.get(5)?,
      birthday:       row.get(6)?,
      tags:           row.get(7)?,
      created_at:     row.get(8)?,
      last_modified:  row.get(9)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:             decode_id(&self.contact_id)?,
      first_name:     self.first_name,
      last_name:      self.last_name,
      email:          self.email,
      phone:          self.phone,
      favorite_color: self.favorite_color,
      birthday:       self.birthday.as_deref().map(decode_date).transpose()?,
      tags:           decode_tags(&self.tags)?,
      created_at:     decode_dt(&self.created_at)?,
      last_modified:  decode_dt(&self.last_modified)?,
    })
  }
}
