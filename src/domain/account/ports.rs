use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::{Account, AccountClaim};
use super::errors::AuthError;
use super::value_objects::{Password, PasswordHash};

/// One-way password hashing and verification
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plaintext password. Each call salts independently, so the
  /// same input yields a different digest every time.
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plaintext password against a stored digest. Fails
  /// closed: any internal hashing error verifies as `false`.
  async fn verify(&self, password: &Password, hash: &PasswordHash) -> bool;
}

/// Claim set carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  /// Public account view; the identity the token proves
  pub user: AccountClaim,
  /// Issued-at, seconds since the Unix epoch
  pub iat: i64,
  /// Expiry, seconds since the Unix epoch
  pub exp: i64,
}

/// A freshly issued bearer token with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed, time-bounded bearer tokens.
///
/// Tokens are stateless: possession of a structurally valid, unexpired,
/// correctly signed token is the sole authorization check. There is no
/// server-side revocation; an issued token stays valid until its expiry
/// elapses even if the account is later modified or deleted.
pub trait TokenService: Send + Sync {
  fn issue(&self, account: &Account) -> Result<IssuedToken, AuthError>;

  /// Pure verification, no I/O. Must reject any token not signed with
  /// the exact expected algorithm, regardless of what the token's own
  /// header claims.
  fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}
