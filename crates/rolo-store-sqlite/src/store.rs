//! [`SqliteStore`], the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};

use rolo_core::{
  Contact, ContactId, ContactPatch, NewContact,
  store::ContactStore,
  validate::{validate_new_contact, validate_patch},
};

use crate::{
  Error, Result,
  encode::{
    CONTACT_COLUMNS, RawContact, encode_date, encode_dt, encode_id, encode_tags,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolo contact store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
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

/// Translate a patch into `(column, value)` pairs. Only supplied fields
/// appear; clearing an optional field yields `NULL`.
fn patch_assignments(patch: ContactPatch) -> Result<Vec<(&'static str, Value)>> {
  let mut out = Vec::new();

  if let Some(v) = patch.first_name {
    out.push(("first_name", Value::Text(v)));
  }
  if let Some(v) = patch.last_name {
    out.push(("last_name", Value::Text(v)));
  }
  if let Some(v) = patch.email {
    out.push(("email", Value::Text(v)));
  }
  if let Some(v) = patch.phone {
    out.push(("phone", v.map_or(Value::Null, Value::Text)));
  }
  if let Some(v) = patch.favorite_color {
    out.push(("favorite_color", v.map_or(Value::Null, Value::Text)));
  }
  if let Some(v) = patch.birthday {
    out.push(("birthday", v.map(encode_date).map_or(Value::Null, Value::Text)));
  }
  if let Some(v) = patch.tags {
    out.push(("tags", Value::Text(encode_tags(&v)?)));
  }

  Ok(out)
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"
              ),
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn create_contact(&self, input: NewContact) -> Result<Contact> {
    validate_new_contact(&input)?;

    let now = Utc::now();
    let contact = Contact {
      id:             ContactId::new_v4(),
      first_name:     input.first_name,
      last_name:      input.last_name,
      email:          input.email,
      phone:          input.phone,
      favorite_color: input.favorite_color,
      birthday:       input.birthday,
      tags:           input.tags,
      created_at:     now,
      last_modified:  now,
    };

    let id_str         = encode_id(contact.id);
    let first_name     = contact.first_name.clone();
    let last_name      = contact.last_name.clone();
    let email          = contact.email.clone();
    let phone          = contact.phone.clone();
    let favorite_color = contact.favorite_color.clone();
    let birthday_str   = contact.birthday.map(encode_date);
    let tags_str       = encode_tags(&contact.tags)?;
    let at_str         = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, first_name, last_name, email, phone,
             favorite_color, birthday, tags, created_at, last_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
          rusqlite::params![
            id_str,
            first_name,
            last_name,
            email,
            phone,
            favorite_color,
            birthday_str,
            tags_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(contact)
  }

  async fn update_contact(
    &self,
    id: ContactId,
    patch: ContactPatch,
  ) -> Result<Option<Contact>> {
    validate_patch(&patch)?;

    let assignments = patch_assignments(patch)?;
    let id_str      = encode_id(id);
    let now_str     = encode_dt(Utc::now());

    // A single UPDATE ... RETURNING keeps the write atomic per row.
    // `max(..., created_at)` holds `last_modified >= created_at` even if the
    // wall clock steps backwards.
    let mut set_clause: Vec<String> = assignments
      .iter()
      .enumerate()
      .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
      .collect();
    let n = assignments.len();
    set_clause.push(format!("last_modified = max(?{}, created_at)", n + 1));

    let sql = format!(
      "UPDATE contacts SET {} WHERE contact_id = ?{} RETURNING {CONTACT_COLUMNS}",
      set_clause.join(", "),
      n + 2,
    );

    let mut values: Vec<Value> =
      assignments.into_iter().map(|(_, value)| value).collect();
    values.push(Value::Text(now_str));
    values.push(Value::Text(id_str));

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params_from_iter(values),
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn delete_contact(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "DELETE FROM contacts WHERE contact_id = ?1 \
                 RETURNING {CONTACT_COLUMNS}"
              ),
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}
