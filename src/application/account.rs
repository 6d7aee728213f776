use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::application::crud::{CrudService, ServiceError};
use crate::domain::account::{
  Account, AccountClaim, AuthError, Credential, Email, Password, PasswordHash, PasswordHasher,
  TokenService,
};
use crate::domain::repository::Repository;

/// Errors raised by account use cases
#[derive(Debug, Error)]
pub enum AccountError {
  #[error(transparent)]
  Auth(#[from] AuthError),

  #[error(transparent)]
  Service(#[from] ServiceError),
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
  pub access_token: String,
  pub expires_at: DateTime<Utc>,
  pub profile: AccountClaim,
}

/// Account use cases: registration, login and the profile projection
pub struct AccountService {
  crud: CrudService<Account>,
  hasher: Arc<dyn PasswordHasher>,
  tokens: Arc<dyn TokenService>,
}

impl AccountService {
  pub fn new(
    repository: Arc<dyn Repository<Account>>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    operation_timeout: Duration,
  ) -> Self {
    Self {
      crud: CrudService::new(repository, operation_timeout),
      hasher,
      tokens,
    }
  }

  /// Registers a new account. The plaintext password is hashed before it
  /// reaches the persistence gateway and is dropped with this frame.
  pub async fn register(
    &self,
    name: String,
    email: String,
    password: String,
  ) -> Result<AccountClaim, AccountError> {
    let email = Email::new(email).map_err(AuthError::from)?;
    let password = Password::new(password).map_err(AuthError::from)?;

    let hash = self.hasher.hash(&password).await?;
    let account = Account::new(name, email.into_inner(), hash.into_inner());

    let stored = self.crud.create(account).await?;
    Ok(stored.claim())
  }

  /// Authenticates a credential and issues a bearer token.
  ///
  /// An unknown email and a wrong password collapse into the same
  /// `CredentialMismatch` value so responses cannot be used to enumerate
  /// accounts.
  pub async fn login(&self, credential: Credential) -> Result<LoginOutcome, AccountError> {
    let email = Email::new(credential.email).map_err(AuthError::from)?;
    let password = Password::new(credential.password).map_err(AuthError::from)?;

    let account = match self.crud.find_by("email", email.as_str()).await {
      Ok(account) => account,
      Err(ServiceError::NotFound) => {
        tracing::warn!(email = %email, "login attempt for unknown email");
        return Err(AuthError::CredentialMismatch.into());
      }
      Err(other) => return Err(other.into()),
    };

    let stored_hash = PasswordHash::new(account.password_hash.clone());
    if !self.hasher.verify(&password, &stored_hash).await {
      tracing::warn!(email = %email, "login attempt with wrong password");
      return Err(AuthError::CredentialMismatch.into());
    }

    let issued = self.tokens.issue(&account)?;
    Ok(LoginOutcome {
      access_token: issued.token,
      expires_at: issued.expires_at,
      profile: account.claim(),
    })
  }
}
