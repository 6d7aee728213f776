use actix_web::{
  Error, HttpMessage, HttpRequest,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::adapters::http::errors::{ApiError, AuthErrorKind};
use crate::domain::account::{AuthError, Claims, TokenService};

/// Bearer-token guard for protected routes.
///
/// Pure front-line filtering: extracts the `Authorization` header,
/// requires the `Bearer ` scheme, verifies the token via the injected
/// `TokenService` and parks the verified claims in request extensions.
/// Any failure short-circuits with the shared 401 envelope before the
/// handler runs. The guard never contacts the storage collaborator.
pub struct AuthGuard {
  tokens: Arc<dyn TokenService>,
}

impl AuthGuard {
  pub fn new(tokens: Arc<dyn TokenService>) -> Self {
    Self { tokens }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthGuardService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthGuardService {
      service: Rc::new(service),
      tokens: self.tokens.clone(),
    }))
  }
}

pub struct AuthGuardService<S> {
  service: Rc<S>,
  tokens: Arc<dyn TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let tokens = self.tokens.clone();

    Box::pin(async move {
      let claims = extract_bearer_token(&req).and_then(|token| {
        tokens.verify(&token).map_err(|e| match e {
          AuthError::TokenExpired => ApiError::Auth(AuthErrorKind::TokenExpired),
          _ => ApiError::Auth(AuthErrorKind::InvalidToken),
        })
      });

      let claims = match claims {
        Ok(claims) => claims,
        Err(api_error) => {
          let (request, _) = req.into_parts();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(claims);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  let header = req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .ok_or(ApiError::Auth(AuthErrorKind::MissingToken))?;

  let token = header
    .strip_prefix("Bearer ")
    .ok_or(ApiError::Auth(AuthErrorKind::MissingToken))?;

  if token.is_empty() {
    return Err(ApiError::Auth(AuthErrorKind::MissingToken));
  }

  Ok(token.to_string())
}

/// Extract the verified claims a guard stored on this request
pub fn token_claims(req: &HttpRequest) -> Result<Claims, ApiError> {
  req
    .extensions()
    .get::<Claims>()
    .cloned()
    .ok_or(ApiError::Auth(AuthErrorKind::MissingToken))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_bearer_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer token-123"))
      .to_srv_request();

    assert_eq!(extract_bearer_token(&req).unwrap(), "token-123");
  }

  #[test]
  fn test_extract_bearer_token_missing_header() {
    let req = TestRequest::default().to_srv_request();
    assert!(extract_bearer_token(&req).is_err());
  }

  #[test]
  fn test_extract_bearer_token_wrong_scheme() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();

    assert!(extract_bearer_token(&req).is_err());
  }

  #[test]
  fn test_extract_bearer_token_empty_token() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer "))
      .to_srv_request();

    assert!(extract_bearer_token(&req).is_err());
  }
}
