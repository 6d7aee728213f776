pub mod access_log;
pub mod auth;

pub use access_log::AccessLogMiddleware;
pub use auth::{AuthGuard, token_claims};
