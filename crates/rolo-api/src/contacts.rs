//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | All contacts |
//! | `POST`   | `/contacts` | Body: [`CreateBody`]; returns 201 + `{"id"}` |
//! | `GET`    | `/contacts/:id` | 400 on malformed id, 404 if not found |
//! | `PUT`    | `/contacts/:id` | Body: [`UpdateBody`]; returns `{"message","contact"}` |
//! | `DELETE` | `/contacts/:id` | Returns `{"message","contact"}` with the last state |
//!
//! Unknown body keys are ignored on both create and update. An update whose
//! body has no recognised key is rejected.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use rolo_core::{
  Contact, ContactId, ContactPatch, NewContact,
  store::ContactStore,
  validate::{parse_birthday, require, validate_new_contact, validate_patch},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Access, ApiError};

// ─── Response bodies ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Created {
  pub id: ContactId,
}

#[derive(Debug, Serialize)]
pub struct ContactMessage {
  pub message: &'static str,
  pub contact: Contact,
}

fn failed<E>(access: Access, summary: &'static str) -> impl FnOnce(E) -> ApiError
where
  E: Into<rolo_core::Error>,
{
  move |e| ApiError::from_core(e.into(), access, summary)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store
    .list_contacts()
    .await
    .map_err(failed(Access::Read, "Failed to fetch contacts"))?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id: ContactId = raw_id.parse()?;
  let contact = store
    .get_contact(id)
    .await
    .map_err(failed(Access::Read, "Server error"))?
    .ok_or(rolo_core::Error::NotFound(id))?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /contacts`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub first_name:     Option<String>,
  pub last_name:      Option<String>,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub favorite_color: Option<String>,
  /// `YYYY-MM-DD`.
  pub birthday:       Option<String>,
  pub tags:           Option<Vec<String>>,
}

impl TryFrom<CreateBody> for NewContact {
  type Error = rolo_core::Error;

  fn try_from(b: CreateBody) -> Result<Self, Self::Error> {
    let input = NewContact {
      first_name:     require("firstName", b.first_name)?,
      last_name:      require("lastName", b.last_name)?,
      email:          require("email", b.email)?,
      phone:          b.phone,
      favorite_color: b.favorite_color,
      birthday:       b.birthday.as_deref().map(parse_birthday).transpose()?,
      tags:           b.tags.unwrap_or_default(),
    };
    validate_new_contact(&input)?;
    Ok(input)
  }
}

/// `POST /contacts` returns 201 + `{"id": "<uuid>"}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let Json(body) = body?;
  let input = NewContact::try_from(body)?;

  let contact = store
    .create_contact(input)
    .await
    .map_err(failed(Access::Write, "Failed to create contact"))?;

  tracing::info!(id = %contact.id, "contact created");
  Ok((StatusCode::CREATED, Json(Created { id: contact.id })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// Distinguish an explicit `null` from an absent key: absent stays `None`,
/// present becomes `Some(value)` where `value` may itself be `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}

/// JSON body accepted by `PUT /contacts/:id`. Every key is optional, but at
/// least one must be present. `null` clears `phone`, `favoriteColor`,
/// `birthday`, and `tags`; it is rejected for the required fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  #[serde(default, deserialize_with = "present")]
  pub first_name:     Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub last_name:      Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub email:          Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub phone:          Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub favorite_color: Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub birthday:       Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub tags:           Option<Option<Vec<String>>>,
}

fn required_if_present(
  field: &str,
  value: Option<Option<String>>,
) -> rolo_core::Result<Option<String>> {
  match value {
    None => Ok(None),
    Some(None) => Err(rolo_core::Error::validation(format!(
      "{field} cannot be null"
    ))),
    Some(v) => require(field, v).map(Some),
  }
}

impl TryFrom<UpdateBody> for ContactPatch {
  type Error = rolo_core::Error;

  fn try_from(b: UpdateBody) -> Result<Self, Self::Error> {
    let patch = ContactPatch {
      first_name:     required_if_present("firstName", b.first_name)?,
      last_name:      required_if_present("lastName", b.last_name)?,
      email:          required_if_present("email", b.email)?,
      phone:          b.phone,
      favorite_color: b.favorite_color,
      birthday:       b
        .birthday
        .map(|d| d.as_deref().map(parse_birthday).transpose())
        .transpose()?,
      tags:           b.tags.map(Option::unwrap_or_default),
    };
    validate_patch(&patch)?;
    Ok(patch)
  }
}

/// `PUT /contacts/:id`: partial update; always refreshes `lastModified`.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
  body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Json<ContactMessage>, ApiError>
where
  S: ContactStore,
{
  let id: ContactId = raw_id.parse()?;
  let Json(body) = body?;
  let patch = ContactPatch::try_from(body)?;

  let contact = store
    .update_contact(id, patch)
    .await
    .map_err(failed(Access::Write, "Failed to update contact"))?
    .ok_or(rolo_core::Error::NotFound(id))?;

  tracing::info!(%id, "contact updated");
  Ok(Json(ContactMessage {
    message: "Contact successfully updated",
    contact,
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`: returns the deleted record.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<ContactMessage>, ApiError>
where
  S: ContactStore,
{
  let id: ContactId = raw_id.parse()?;
  let contact = store
    .delete_contact(id)
    .await
    .map_err(failed(Access::Write, "Failed to delete contact"))?
    .ok_or(rolo_core::Error::NotFound(id))?;

  tracing::info!(%id, "contact deleted");
  Ok(Json(ContactMessage { message: "Contact deleted", contact }))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use serde_json::json;

  use super::*;

  fn create_body(value: serde_json::Value) -> CreateBody {
    serde_json::from_value(value).unwrap()
  }

  fn update_body(value: serde_json::Value) -> UpdateBody {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn create_body_ignores_unknown_and_server_fields() {
    let input = NewContact::try_from(create_body(json!({
      "firstName": "Ann",
      "lastName": "Lee",
      "email": "a@x.com",
      "id": "abc",
      "createdAt": "1999-01-01T00:00:00Z",
      "nickname": "annie",
    })))
    .unwrap();
    assert_eq!(input, NewContact::new("Ann", "Lee", "a@x.com"));
  }

  #[test]
  fn create_body_null_tags_means_empty() {
    let input = NewContact::try_from(create_body(json!({
      "firstName": "Ann", "lastName": "Lee", "email": "a@x.com", "tags": null,
    })))
    .unwrap();
    assert!(input.tags.is_empty());
  }

  #[test]
  fn create_body_reports_missing_field() {
    let err = NewContact::try_from(create_body(json!({
      "firstName": "Ann", "email": "a@x.com",
    })))
    .unwrap_err();
    assert_eq!(err.to_string(), "lastName is required");
  }

  #[test]
  fn update_body_separates_null_from_absent() {
    let patch = ContactPatch::try_from(update_body(json!({
      "phone": null, "favoriteColor": "red",
    })))
    .unwrap();
    assert_eq!(patch.phone, Some(None));
    assert_eq!(patch.favorite_color, Some(Some("red".into())));
    assert_eq!(patch.birthday, None);
    assert_eq!(patch.first_name, None);
  }

  #[test]
  fn update_body_rejects_null_required_field() {
    let err = ContactPatch::try_from(update_body(json!({ "email": null })))
      .unwrap_err();
    assert_eq!(err.to_string(), "email cannot be null");
  }

  #[test]
  fn update_body_with_only_unknown_keys_is_empty() {
    let err = ContactPatch::try_from(update_body(json!({ "nickname": "x" })))
      .unwrap_err();
    assert!(matches!(err, rolo_core::Error::Validation(_)));
  }

  #[test]
  fn update_body_parses_birthday() {
    let patch = ContactPatch::try_from(update_body(json!({
      "birthday": "2000-02-29",
    })))
    .unwrap();
    assert_eq!(patch.birthday, Some(NaiveDate::from_ymd_opt(2000, 2, 29)));

    assert!(
      ContactPatch::try_from(update_body(json!({ "birthday": "2001-02-29" })))
        .is_err()
    );
  }
}
