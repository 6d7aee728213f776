pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use errors::{ApiError, AuthErrorKind, ErrorBody, ErrorEnvelope};
pub use middleware::{AccessLogMiddleware, AuthGuard, token_claims};
pub use routes::{configure_account_routes, configure_content_routes, health_handler};
