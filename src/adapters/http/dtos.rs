use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::account::AccountClaim;
use crate::domain::content::ContentItem;

/// Request to store a new content item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StoreContentRequest {
  #[validate(length(min = 1, max = 255, message = "title is required"))]
  pub title: String,

  #[validate(length(min = 1, message = "description is required"))]
  pub description: String,
}

/// Request to partially update a content item. Absent fields leave the
/// stored values untouched; the slug always follows the title.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContentRequest {
  pub id: Uuid,

  #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
  pub title: Option<String>,

  #[validate(length(min = 1, message = "description must not be empty"))]
  pub description: Option<String>,
}

/// Request to delete a content item
#[derive(Debug, Clone, Deserialize)]
pub struct DestroyContentRequest {
  pub id: Uuid,
}

/// Request for account registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(min = 1, max = 255, message = "name is required"))]
  pub name: String,

  #[validate(email(message = "invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, max = 128, message = "password is required"))]
  pub password: String,
}

/// Request for login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(email(message = "invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "password is required"))]
  pub password: String,
}

/// Bare success acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
  pub status: &'static str,
}

impl StatusResponse {
  pub fn success() -> Self {
    Self { status: "success" }
  }
}

/// Success acknowledgement echoing the updated resource
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedContentResponse {
  pub status: &'static str,
  pub data: ContentItem,
}

impl UpdatedContentResponse {
  pub fn new(data: ContentItem) -> Self {
    Self {
      status: "success",
      data,
    }
  }
}

/// Success acknowledgement carrying the registered profile
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub status: &'static str,
  pub data: AccountClaim,
}

impl RegisterResponse {
  pub fn new(data: AccountClaim) -> Self {
    Self {
      status: "success",
      data,
    }
  }
}

/// Successful login payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub token_type: &'static str,
  pub access_token: String,
  /// Seconds until the token expires
  pub expires_in: i64,
  pub profile: AccountClaim,
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::Validate;

  #[test]
  fn test_store_request_requires_title_and_description() {
    let ok = StoreContentRequest {
      title: "Hello World".to_string(),
      description: "d".to_string(),
    };
    assert!(ok.validate().is_ok());

    let missing = StoreContentRequest {
      title: String::new(),
      description: "d".to_string(),
    };
    assert!(missing.validate().is_err());
  }

  #[test]
  fn test_update_request_accepts_absent_fields() {
    let partial = UpdateContentRequest {
      id: Uuid::new_v4(),
      title: None,
      description: None,
    };
    assert!(partial.validate().is_ok());

    let empty_title = UpdateContentRequest {
      id: Uuid::new_v4(),
      title: Some(String::new()),
      description: None,
    };
    assert!(empty_title.validate().is_err());
  }

  #[test]
  fn test_register_request_validates_email() {
    let bad = RegisterRequest {
      name: "Ann".to_string(),
      email: "not-an-email".to_string(),
      password: "secret".to_string(),
    };
    assert!(bad.validate().is_err());
  }
}
