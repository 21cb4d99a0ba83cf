//! Per-operation validation.
//!
//! Each function returns `Ok(())` or a [`Error::Validation`] naming the first
//! offending field. The HTTP layer runs them before calling a store, and
//! stores run them again on their own inputs.

use chrono::NaiveDate;

use crate::{ContactPatch, Error, NewContact, Result};

/// Wire name of every field a client may write.
pub const RECOGNIZED_FIELDS: [&str; 7] = [
  "firstName",
  "lastName",
  "email",
  "phone",
  "favoriteColor",
  "birthday",
  "tags",
];

/// Parse a birthday in strict `YYYY-MM-DD` form.
///
/// The shape is checked before the calendar, so `"2024-1-05"` and
/// `"+2024-01-05"` fail even though chrono would accept them.
pub fn parse_birthday(raw: &str) -> Result<NaiveDate> {
  let bytes = raw.as_bytes();
  let shaped = bytes.len() == 10
    && bytes[4] == b'-'
    && bytes[7] == b'-'
    && bytes
      .iter()
      .enumerate()
      .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

  if !shaped {
    return Err(Error::validation(format!(
      "birthday {raw:?} must use the YYYY-MM-DD format"
    )));
  }

  NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
    Error::validation(format!("birthday {raw:?} is not a valid calendar date"))
  })
}

/// Unwrap a required string field, rejecting absent and blank values.
pub fn require(field: &str, value: Option<String>) -> Result<String> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v),
    Some(_) => Err(Error::validation(format!("{field} must not be empty"))),
    None => Err(Error::validation(format!("{field} is required"))),
  }
}

fn non_empty(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::validation(format!("{field} must not be empty")));
  }
  Ok(())
}

/// Check the invariants of a contact about to be created.
pub fn validate_new_contact(input: &NewContact) -> Result<()> {
  non_empty("firstName", &input.first_name)?;
  non_empty("lastName", &input.last_name)?;
  non_empty("email", &input.email)?;
  Ok(())
}

/// Check that a patch sets at least one field and never blanks a required
/// one.
pub fn validate_patch(patch: &ContactPatch) -> Result<()> {
  if patch.is_empty() {
    return Err(Error::validation(format!(
      "update must contain at least one of: {}",
      RECOGNIZED_FIELDS.join(", ")
    )));
  }
  if let Some(v) = &patch.first_name {
    non_empty("firstName", v)?;
  }
  if let Some(v) = &patch.last_name {
    non_empty("lastName", v)?;
  }
  if let Some(v) = &patch.email {
    non_empty("email", v)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn birthday_accepts_iso_date() {
    let date = parse_birthday("1990-04-02").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(1990, 4, 2).unwrap());
  }

  #[test]
  fn birthday_rejects_bad_shape() {
    for raw in ["1990-4-02", "90-04-02", "1990/04/02", "+1990-04-02", "", "1990-04-02T00:00"] {
      let err = parse_birthday(raw).unwrap_err();
      assert!(matches!(err, Error::Validation(_)), "accepted {raw:?}");
    }
  }

  #[test]
  fn birthday_rejects_impossible_dates() {
    assert!(parse_birthday("2024-13-40").is_err());
    assert!(parse_birthday("2023-02-29").is_err());
    assert!(parse_birthday("2024-02-29").is_ok());
  }

  #[test]
  fn require_distinguishes_missing_and_blank() {
    let missing = require("email", None).unwrap_err();
    assert_eq!(missing.to_string(), "email is required");

    let blank = require("email", Some("  ".into())).unwrap_err();
    assert_eq!(blank.to_string(), "email must not be empty");

    assert_eq!(require("email", Some("a@x.com".into())).unwrap(), "a@x.com");
  }

  #[test]
  fn new_contact_requires_names_and_email() {
    assert!(validate_new_contact(&NewContact::new("Ann", "Lee", "a@x.com")).is_ok());
    assert!(validate_new_contact(&NewContact::new("", "Lee", "a@x.com")).is_err());
    assert!(validate_new_contact(&NewContact::new("Ann", "Lee", " ")).is_err());
  }

  #[test]
  fn patch_must_set_something() {
    let err = validate_patch(&ContactPatch::default()).unwrap_err();
    assert!(err.to_string().contains("at least one"));
  }

  #[test]
  fn patch_cannot_blank_required_field() {
    let patch = ContactPatch { last_name: Some(String::new()), ..Default::default() };
    assert!(validate_patch(&patch).is_err());

    let patch = ContactPatch { tags: Some(vec![]), ..Default::default() };
    assert!(validate_patch(&patch).is_ok());
  }
}
