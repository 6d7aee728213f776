use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Authentication and credential errors
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("token not provided")]
  MissingToken,

  #[error("invalid token")]
  InvalidToken,

  #[error("token expired")]
  TokenExpired,

  /// Covers both "unknown email" and "wrong password": the two are
  /// deliberately indistinguishable to prevent account enumeration.
  #[error("email or password does not match")]
  CredentialMismatch,

  #[error("token signing failed: {0}")]
  Signing(String),

  #[error("password hashing failed: {0}")]
  Hash(String),

  #[error("validation error: {0}")]
  ValueObject(#[from] ValueObjectError),
}
