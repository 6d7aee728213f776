use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::account::{AuthError, Password, PasswordHash, PasswordHasher};

/// Argon2id password hasher
///
/// Fixed work factor: 19 MiB memory, 2 iterations, 1 lane. A fresh salt
/// is generated per call, so hashing the same input twice yields two
/// different digests that both verify.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, AuthError> {
    let memory_cost = 19456;
    let time_cost = 2;
    let parallelism = 1;
    let output_len = Some(32);

    let params = Params::new(memory_cost, time_cost, parallelism, output_len)
      .map_err(|e| AuthError::Hash(format!("invalid argon2 params: {}", e)))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| AuthError::Hash(format!("failed to hash password: {}", e)))?;

    Ok(PasswordHash::new(hash.to_string()))
  }

  /// Fails closed: a malformed stored hash or any internal error
  /// verifies as `false`, never as a match and never as a 500.
  async fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
    let parsed = match Argon2PasswordHash::new(hash.as_str()) {
      Ok(parsed) => parsed,
      Err(e) => {
        tracing::warn!("stored password hash is malformed: {}", e);
        return false;
      }
    };

    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed)
    {
      Ok(()) => true,
      Err(argon2::password_hash::Error::Password) => false,
      Err(e) => {
        tracing::warn!("password verification errored: {}", e);
        false
      }
    }
  }
}
