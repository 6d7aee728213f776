use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};

use crate::domain::account::{Account, AuthError, Claims, IssuedToken, TokenService};

/// HS256 bearer token service.
///
/// The signing secret and token lifetime are injected at construction;
/// there is no ambient global. Verification pins the algorithm to HS256:
/// a token whose header names any other algorithm fails validation no
/// matter what it claims, closing the classic signature-bypass hole.
///
/// Tokens are stateless and unrevocable by design. An issued token stays
/// valid until `exp` even if the account is modified or deleted in the
/// meantime; the bounded lifetime is the only containment.
pub struct JwtTokenService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  ttl_seconds: i64,
}

impl JwtTokenService {
  pub fn new(secret: &str, ttl_seconds: i64) -> Self {
    // Only signature and expiry are validated; no other claim is required.
    let validation = Validation::new(Algorithm::HS256);

    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      validation,
      ttl_seconds,
    }
  }
}

impl TokenService for JwtTokenService {
  fn issue(&self, account: &Account) -> Result<IssuedToken, AuthError> {
    let now = Utc::now();
    let expires_at = expiry(now, self.ttl_seconds);

    let claims = Claims {
      user: account.claim(),
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| AuthError::Signing(e.to_string()))?;

    Ok(IssuedToken { token, expires_at })
  }

  fn verify(&self, token: &str) -> Result<Claims, AuthError> {
    match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
      Ok(data) => Ok(data.claims),
      Err(e) => match e.kind() {
        ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
        _ => Err(AuthError::InvalidToken),
      },
    }
  }
}

fn expiry(now: DateTime<Utc>, ttl_seconds: i64) -> DateTime<Utc> {
  let exp = now.timestamp() + ttl_seconds;
  // Truncate to whole seconds so the claim and the returned expiry agree.
  Utc.timestamp_opt(exp, 0).single().unwrap_or(now)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn account() -> Account {
    use crate::domain::entity::Entity;

    let mut account = Account::new(
      "Ann".to_string(),
      "a@x.com".to_string(),
      "$argon2id$stub".to_string(),
    );
    account.prepare_create();
    account
  }

  #[test]
  fn test_issue_then_verify_round_trips_identity() {
    let service = JwtTokenService::new("test-secret", 3600);
    let account = account();

    let issued = service.issue(&account).unwrap();
    let claims = service.verify(&issued.token).unwrap();

    assert_eq!(claims.user.id, account.id);
    assert_eq!(claims.user.email, "a@x.com");
    assert_eq!(claims.exp, issued.expires_at.timestamp());
    assert!(issued.expires_at > Utc::now());
  }

  #[test]
  fn test_claims_never_carry_password_hash() {
    let service = JwtTokenService::new("test-secret", 3600);
    let issued = service.issue(&account()).unwrap();

    // Claims payload is the middle dot-separated segment.
    use base64::Engine as _;
    let payload = issued.token.split('.').nth(1).unwrap();
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
      .decode(payload)
      .unwrap();
    let body = String::from_utf8(decoded).unwrap();

    assert!(!body.contains("argon2id"));
    assert!(!body.contains("password"));
  }

  #[test]
  fn test_verify_rejects_wrong_secret() {
    let issuer = JwtTokenService::new("secret-a", 3600);
    let verifier = JwtTokenService::new("secret-b", 3600);

    let issued = issuer.issue(&account()).unwrap();
    let result = verifier.verify(&issued.token);

    assert!(matches!(result, Err(AuthError::InvalidToken)));
  }

  #[test]
  fn test_verify_rejects_expired_token() {
    let service = JwtTokenService::new("test-secret", -120);

    let issued = service.issue(&account()).unwrap();
    let result = service.verify(&issued.token);

    assert!(matches!(result, Err(AuthError::TokenExpired)));
  }

  #[test]
  fn test_verify_rejects_other_algorithms() {
    let service = JwtTokenService::new("test-secret", 3600);
    let account = account();
    let claims = Claims {
      user: account.claim(),
      iat: Utc::now().timestamp(),
      exp: Utc::now().timestamp() + 3600,
    };

    // Signed with the same secret but a different HMAC algorithm: the
    // pinned validation must refuse it.
    let foreign = jsonwebtoken::encode(
      &Header::new(Algorithm::HS384),
      &claims,
      &EncodingKey::from_secret("test-secret".as_bytes()),
    )
    .unwrap();

    assert!(matches!(
      service.verify(&foreign),
      Err(AuthError::InvalidToken)
    ));
  }

  #[test]
  fn test_verify_rejects_malformed_token() {
    let service = JwtTokenService::new("test-secret", 3600);

    assert!(matches!(
      service.verify("not-a-token"),
      Err(AuthError::InvalidToken)
    ));
    assert!(matches!(service.verify(""), Err(AuthError::InvalidToken)));
  }
}
