use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;

use crate::application::account::AccountError;
use crate::application::crud::ServiceError;
use crate::domain::account::AuthError;

/// API error: the single point that maps a typed condition to a status
/// code and a public message, and the single point that writes the error
/// log record. Public and internal text live in separate fields from
/// construction; the internal detail is for the log sink only.
#[derive(Debug)]
pub enum ApiError {
  /// Malformed or missing required input (422)
  Validation(String),

  /// Missing, malformed, invalid or expired token (401)
  Auth(AuthErrorKind),

  /// Login failure; deliberately indistinguishable between unknown
  /// email and wrong password (424, the dependency-failed class)
  CredentialMismatch,

  /// Lookup miss (404)
  NotFound,

  /// Duplicate unique field, surfaced from the storage collaborator
  /// (409). The carried detail is internal.
  Conflict(String),

  /// Operation context expired (504)
  DeadlineExceeded,

  /// Catch-all (500). The carried detail is internal and never leaves
  /// the process.
  Internal(String),
}

/// Authentication failure kinds, all 401
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  MissingToken,
  InvalidToken,
  TokenExpired,
}

/// Fixed wire shape for every error response
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
  pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
  pub code: u16,
  pub message: String,
  pub errors: JsonValue,
}

impl ApiError {
  /// Public message; never the raw internal error text for the 500 class.
  fn public_message(&self) -> String {
    match self {
      ApiError::Validation(_) => "invalid parameter".to_string(),
      ApiError::Auth(AuthErrorKind::MissingToken) => "token not provided".to_string(),
      ApiError::Auth(AuthErrorKind::InvalidToken) => "invalid token".to_string(),
      ApiError::Auth(AuthErrorKind::TokenExpired) => "token expired".to_string(),
      ApiError::CredentialMismatch => "email or password does not match".to_string(),
      ApiError::NotFound => "resource not found".to_string(),
      ApiError::Conflict(_) => "resource already exists".to_string(),
      ApiError::DeadlineExceeded => "operation timed out".to_string(),
      ApiError::Internal(_) => "internal server error".to_string(),
    }
  }

  /// Validation detail exposed under the envelope's `errors` field
  fn public_detail(&self) -> JsonValue {
    match self {
      ApiError::Validation(detail) => JsonValue::String(detail.clone()),
      _ => JsonValue::Null,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(detail) => write!(f, "validation error: {}", detail),
      ApiError::Auth(kind) => write!(f, "authentication error: {:?}", kind),
      ApiError::CredentialMismatch => write!(f, "credential mismatch"),
      ApiError::NotFound => write!(f, "not found"),
      ApiError::Conflict(detail) => write!(f, "conflict: {}", detail),
      ApiError::DeadlineExceeded => write!(f, "deadline exceeded"),
      ApiError::Internal(detail) => write!(f, "internal error: {}", detail),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
      ApiError::CredentialMismatch => StatusCode::FAILED_DEPENDENCY,
      ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();

    // One log record per error, internal detail included. The access-log
    // span around the request supplies method and path.
    match self {
      ApiError::Internal(detail) => {
        tracing::error!(status = status.as_u16(), internal = %detail, "request failed");
      }
      ApiError::Conflict(detail) => {
        tracing::warn!(status = status.as_u16(), internal = %detail, "request failed");
      }
      other => {
        tracing::warn!(status = status.as_u16(), error = %other, "request failed");
      }
    }

    let envelope = ErrorEnvelope {
      error: ErrorBody {
        code: status.as_u16(),
        message: self.public_message(),
        errors: self.public_detail(),
      },
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(envelope)
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::MissingToken => ApiError::Auth(AuthErrorKind::MissingToken),
      AuthError::InvalidToken => ApiError::Auth(AuthErrorKind::InvalidToken),
      AuthError::TokenExpired => ApiError::Auth(AuthErrorKind::TokenExpired),
      AuthError::CredentialMismatch => ApiError::CredentialMismatch,
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AuthError::Signing(detail) => ApiError::Internal(detail),
      AuthError::Hash(detail) => ApiError::Internal(detail),
    }
  }
}

impl From<ServiceError> for ApiError {
  fn from(error: ServiceError) -> Self {
    match error {
      ServiceError::NotFound => ApiError::NotFound,
      ServiceError::Conflict(detail) => ApiError::Conflict(detail),
      ServiceError::DeadlineExceeded => ApiError::DeadlineExceeded,
      ServiceError::Repository(err) => ApiError::Internal(err.to_string()),
    }
  }
}

impl From<AccountError> for ApiError {
  fn from(error: AccountError) -> Self {
    match error {
      AccountError::Auth(err) => err.into(),
      AccountError::Service(err) => err.into(),
    }
  }
}

impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_code_mapping() {
    assert_eq!(
      ApiError::Validation("x".to_string()).status_code(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::MissingToken).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::CredentialMismatch.status_code(),
      StatusCode::FAILED_DEPENDENCY
    );
    assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
      ApiError::Conflict("dup".to_string()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::DeadlineExceeded.status_code(),
      StatusCode::GATEWAY_TIMEOUT
    );
    assert_eq!(
      ApiError::Internal("boom".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_internal_detail_never_reaches_the_public_message() {
    let error = ApiError::Internal("connection refused to 10.0.0.5:5432".to_string());
    assert_eq!(error.public_message(), "internal server error");
    assert_eq!(error.public_detail(), JsonValue::Null);
  }

  #[test]
  fn test_conflict_detail_stays_internal() {
    let error = ApiError::Conflict("duplicate key value violates \"accounts_email_key\"".to_string());
    assert_eq!(error.public_message(), "resource already exists");
    assert_eq!(error.public_detail(), JsonValue::Null);
  }

  #[test]
  fn test_auth_error_conversion() {
    let api: ApiError = AuthError::TokenExpired.into();
    assert_eq!(api.status_code(), StatusCode::UNAUTHORIZED);

    let api: ApiError = AuthError::CredentialMismatch.into();
    assert_eq!(api.status_code(), StatusCode::FAILED_DEPENDENCY);
  }

  #[test]
  fn test_service_error_conversion() {
    let api: ApiError = ServiceError::NotFound.into();
    assert_eq!(api.status_code(), StatusCode::NOT_FOUND);

    let api: ApiError = ServiceError::DeadlineExceeded.into();
    assert_eq!(api.status_code(), StatusCode::GATEWAY_TIMEOUT);
  }

  #[test]
  fn test_envelope_shape() {
    let response = ApiError::NotFound.error_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
  }
}
