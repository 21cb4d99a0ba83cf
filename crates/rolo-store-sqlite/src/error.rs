//! Error type for `rolo-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rolo_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for rolo_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(e) => e,
      Error::Database(e) => match constraint_violation(&e) {
        Some(message) => rolo_core::Error::Validation(message),
        None => rolo_core::Error::Storage(Box::new(Error::Database(e))),
      },
      other => rolo_core::Error::Storage(Box::new(other)),
    }
  }
}

/// The SQLite message for a failed `CHECK`/`NOT NULL`/`UNIQUE` constraint.
fn constraint_violation(err: &tokio_rusqlite::Error) -> Option<String> {
  match err {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      code,
      message,
    )) if code.code == rusqlite::ErrorCode::ConstraintViolation => {
      Some(message.clone().unwrap_or_else(|| code.to_string()))
    }
    _ => None,
  }
}
