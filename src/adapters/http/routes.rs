use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::application::account::AccountService;
use crate::application::content::ContentService;
use crate::domain::account::TokenService;

use super::handlers::account::{login_handler, profile_handler, register_handler};
use super::handlers::content::{
  destroy_content_handler, get_content_handler, store_content_handler, update_content_handler,
};
use super::middleware::AuthGuard;

/// Configure content item routes.
///
/// Mounted under a `/content` scope. Mutating routes carry the bearer
/// guard; the slug lookup is public. Fixed paths are registered before
/// the `{slug}` catch-all.
pub fn configure_content_routes(
  cfg: &mut web::ServiceConfig,
  service: Arc<ContentService>,
  tokens: Arc<dyn TokenService>,
) {
  cfg
    .app_data(web::Data::new(service))
    .service(
      web::resource("/store")
        .wrap(AuthGuard::new(tokens.clone()))
        .route(web::post().to(store_content_handler)),
    )
    .service(
      web::resource("/update")
        .wrap(AuthGuard::new(tokens.clone()))
        .route(web::put().to(update_content_handler)),
    )
    .service(
      web::resource("/destroy")
        .wrap(AuthGuard::new(tokens))
        .route(web::delete().to(destroy_content_handler)),
    )
    .service(web::resource("/{slug}").route(web::get().to(get_content_handler)));
}

/// Configure account routes.
///
/// Mounted under an `/account` scope. Registration and login are public;
/// the profile projection requires a valid bearer token.
pub fn configure_account_routes(
  cfg: &mut web::ServiceConfig,
  service: Arc<AccountService>,
  tokens: Arc<dyn TokenService>,
) {
  cfg
    .app_data(web::Data::new(service))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .service(
      web::resource("/profile")
        .wrap(AuthGuard::new(tokens))
        .route(web::get().to(profile_handler)),
    );
}

/// Health probe at the root
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().body("Server up!")
}
