use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::entity::Entity;

/// User account entity
///
/// The password field only ever holds the output of the one-way hash
/// function; plaintext never reaches this struct. It is also skipped on
/// serialization so no response or claim payload can carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
  /// Unique identifier, assigned at creation
  pub id: Uuid,
  pub name: String,
  /// Intended unique; uniqueness is enforced by the storage collaborator
  pub email: String,
  #[serde(skip_serializing, default)]
  pub password_hash: String,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

impl Account {
  /// Creates a new account with an already-hashed password. Identifier
  /// and timestamps are assigned by `prepare_create`.
  pub fn new(name: String, email: String, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::nil(),
      name,
      email,
      password_hash,
      created_at: now,
      updated_at: now,
    }
  }

  /// Public view of the account: everything a token claim or a profile
  /// response is allowed to carry. No password hash, by construction.
  pub fn claim(&self) -> AccountClaim {
    AccountClaim {
      id: self.id,
      name: self.name.clone(),
      email: self.email.clone(),
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}

/// Reduced, non-secret account view embedded in token claims and
/// returned as the profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountClaim {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

/// Partial update payload for an account
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
  pub name: Option<String>,
  pub email: Option<String>,
  pub password_hash: Option<String>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Account {
  type Patch = AccountPatch;

  fn prepare_create(&mut self) {
    let now = Utc::now();
    self.id = Uuid::new_v4();
    self.created_at = now;
    self.updated_at = now;
  }

  fn prepare_update(patch: &mut AccountPatch) {
    patch.updated_at = Some(Utc::now());
  }
}

/// Login input: transient, never persisted, never logged
#[derive(Clone, Deserialize)]
pub struct Credential {
  pub email: String,
  pub password: String,
}

/// The plaintext never reaches any formatter output.
impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credential")
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_prepare_create_assigns_id_and_timestamps() {
    let mut account = Account::new(
      "Ann".to_string(),
      "a@x.com".to_string(),
      "$argon2id$stub".to_string(),
    );
    account.prepare_create();

    assert!(!account.id.is_nil());
    assert_eq!(account.created_at, account.updated_at);
  }

  #[test]
  fn test_claim_excludes_password_hash() {
    let mut account = Account::new(
      "Ann".to_string(),
      "a@x.com".to_string(),
      "$argon2id$stub".to_string(),
    );
    account.prepare_create();

    let claim = serde_json::to_value(account.claim()).unwrap();
    assert_eq!(claim["email"], "a@x.com");
    assert!(claim.get("password_hash").is_none());
    assert!(claim.get("password").is_none());
  }

  #[test]
  fn test_account_serialization_skips_password_hash() {
    let account = Account::new(
      "Ann".to_string(),
      "a@x.com".to_string(),
      "$argon2id$stub".to_string(),
    );

    let json = serde_json::to_value(&account).unwrap();
    assert!(json.get("password_hash").is_none());
  }

  #[test]
  fn test_credential_debug_does_not_expose_plaintext() {
    let credential = Credential {
      email: "a@x.com".to_string(),
      password: "secret".to_string(),
    };

    let rendered = format!("{:?}", credential);
    assert!(!rendered.contains("secret"));
    assert!(rendered.contains("***"));
    assert!(rendered.contains("a@x.com"));
  }

  #[test]
  fn test_prepare_update_stamps_updated_at() {
    let mut patch = AccountPatch {
      name: Some("Bea".to_string()),
      ..AccountPatch::default()
    };
    Account::prepare_update(&mut patch);

    assert!(patch.updated_at.is_some());
    assert!(patch.email.is_none());
  }
}
