pub mod account_repository;
pub mod content_repository;

pub use account_repository::PgAccountRepository;
pub use content_repository::PgContentRepository;
