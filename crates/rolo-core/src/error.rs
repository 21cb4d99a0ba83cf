//! Error types for `rolo-core`.

use thiserror::Error;

use crate::contact::ContactId;

/// The failure taxonomy shared by every store backend and the HTTP layer.
#[derive(Debug, Error)]
pub enum Error {
  /// Input is missing a required field or carries a malformed value.
  #[error("{0}")]
  Validation(String),

  /// The identifier is not in the format the store assigns.
  #[error("invalid contact id: {0:?}")]
  InvalidIdentifier(String),

  #[error("contact not found: {0}")]
  NotFound(ContactId),

  /// The backend is unreachable or failed internally.
  #[error("{0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
