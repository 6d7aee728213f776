use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::dtos::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::token_claims;
use crate::application::account::AccountService;
use crate::domain::account::Credential;

/// POST /account/register
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  service: web::Data<Arc<AccountService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let profile = service
    .register(request.name, request.email, request.password)
    .await?;

  Ok(HttpResponse::Ok().json(RegisterResponse::new(profile)))
}

/// POST /account/login
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  service: web::Data<Arc<AccountService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let outcome = service
    .login(Credential {
      email: request.email,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    token_type: "Bearer",
    access_token: outcome.access_token,
    expires_in: (outcome.expires_at - Utc::now()).num_seconds(),
    profile: outcome.profile,
  }))
}

/// GET /account/profile — protected; answers straight from the verified
/// token claims, no storage round trip
pub async fn profile_handler(req: HttpRequest) -> Result<HttpResponse, ApiError> {
  let claims = token_claims(&req)?;
  Ok(HttpResponse::Ok().json(claims.user))
}
