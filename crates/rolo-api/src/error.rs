//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body is JSON: `{"error": "...", "details": "..."}`, with
//! `details` omitted when there is nothing to add.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Whether a storage failure happened while reading or writing.
///
/// Read-path failures are reported as 500; write-path failures as 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  Read,
  Write,
}

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("method not allowed")]
  MethodNotAllowed,

  #[error("bad request: {error}")]
  BadRequest {
    error:   String,
    details: Option<String>,
  },

  #[error("internal error: {error}")]
  Internal {
    error:   String,
    details: Option<String>,
  },
}

impl ApiError {
  pub fn bad_request(error: impl Into<String>, details: impl Into<String>) -> Self {
    Self::BadRequest { error: error.into(), details: Some(details.into()) }
  }

  /// Map a core error onto the response table. `summary` becomes the
  /// `error` field for storage failures.
  pub fn from_core(err: rolo_core::Error, access: Access, summary: &str) -> Self {
    match err {
      rolo_core::Error::Validation(msg) => {
        Self::bad_request("Validation failed", msg)
      }
      rolo_core::Error::InvalidIdentifier(raw) => Self::bad_request(
        "Invalid contact ID format",
        format!("{raw:?} is not a contact id"),
      ),
      rolo_core::Error::NotFound(_) => Self::NotFound("Contact not found".into()),
      rolo_core::Error::Storage(e) => {
        tracing::error!(error = %e, ?access, "{summary}");
        let details = Some(e.to_string());
        match access {
          Access::Read => Self::Internal { error: summary.into(), details },
          Access::Write => Self::BadRequest { error: summary.into(), details },
        }
      }
    }
  }

  fn parts(&self) -> (StatusCode, &str, Option<&str>) {
    match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.as_str(), None),
      ApiError::MethodNotAllowed => {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
      }
      ApiError::BadRequest { error, details } => {
        (StatusCode::BAD_REQUEST, error.as_str(), details.as_deref())
      }
      ApiError::Internal { error, details } => {
        (StatusCode::INTERNAL_SERVER_ERROR, error.as_str(), details.as_deref())
      }
    }
  }
}

/// Identifier parsing and body validation never touch storage, so the
/// access path is irrelevant for them.
impl From<rolo_core::Error> for ApiError {
  fn from(err: rolo_core::Error) -> Self {
    Self::from_core(err, Access::Read, "Server error")
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::bad_request("Invalid request body", rejection.body_text())
  }
}

/// Fallback for paths no route matches.
pub async fn route_not_found() -> ApiError {
  ApiError::NotFound("Route not found".into())
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError { ApiError::MethodNotAllowed }

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error, details) = self.parts();
    let body = match details {
      Some(details) => json!({ "error": error, "details": details }),
      None => json!({ "error": error }),
    };
    (status, Json(body)).into_response()
  }
}
