use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::entity::Entity;

/// Storage-level errors surfaced by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("record not found")]
  NotFound,

  #[error("duplicate key violation: {0}")]
  Duplicate(String),

  #[error("unsupported lookup key: {0}")]
  UnsupportedKey(String),

  #[error("database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("query execution failed: {0}")]
  QueryFailed(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::Duplicate(db_err.message().to_string())
        } else {
          RepositoryError::QueryFailed(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

/// Generic persistence port. The core depends only on this contract; the
/// concrete storage technology lives behind it.
///
/// `find_by` is a single-field equality lookup (slug for content items,
/// email for accounts). A miss is `RepositoryError::NotFound`, never an
/// empty success. `update` merges the patch into the stored record:
/// `None` fields leave the stored value untouched.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
  async fn create(&self, entity: E) -> Result<E, RepositoryError>;

  async fn find_by(&self, key: &str, value: &str) -> Result<E, RepositoryError>;

  async fn update(&self, id: Uuid, patch: E::Patch) -> Result<E, RepositoryError>;

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
