use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entity::Entity;
use crate::domain::repository::{Repository, RepositoryError};

/// Usecase-level error: the typed conditions the pipeline maps to
/// status codes. Handlers never inspect repository errors directly.
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("record not found")]
  NotFound,

  #[error("duplicate unique field: {0}")]
  Conflict(String),

  #[error("operation deadline exceeded")]
  DeadlineExceeded,

  #[error("repository error: {0}")]
  Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
  fn from(error: RepositoryError) -> Self {
    match error {
      RepositoryError::NotFound => ServiceError::NotFound,
      RepositoryError::Duplicate(detail) => ServiceError::Conflict(detail),
      other => ServiceError::Repository(other),
    }
  }
}

/// Generic CRUD usecase, parameterized over a resource type.
///
/// Business rules run through the entity's `prepare_create` /
/// `prepare_update` hooks; every gateway call is bounded by the
/// configured operation timeout. A slow or hung storage call surfaces
/// `DeadlineExceeded` instead of blocking the handling task, and a
/// timed-out write is abandoned rather than completed stale.
pub struct CrudService<E: Entity> {
  repository: Arc<dyn Repository<E>>,
  operation_timeout: Duration,
}

impl<E: Entity> CrudService<E> {
  pub fn new(repository: Arc<dyn Repository<E>>, operation_timeout: Duration) -> Self {
    Self {
      repository,
      operation_timeout,
    }
  }

  async fn bounded<T>(
    &self,
    operation: impl Future<Output = Result<T, RepositoryError>>,
  ) -> Result<T, ServiceError> {
    match tokio::time::timeout(self.operation_timeout, operation).await {
      Ok(result) => result.map_err(ServiceError::from),
      Err(_) => Err(ServiceError::DeadlineExceeded),
    }
  }

  pub async fn create(&self, mut entity: E) -> Result<E, ServiceError> {
    entity.prepare_create();
    self.bounded(self.repository.create(entity)).await
  }

  pub async fn update(&self, id: Uuid, mut patch: E::Patch) -> Result<E, ServiceError> {
    E::prepare_update(&mut patch);
    self.bounded(self.repository.update(id, patch)).await
  }

  pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
    self.bounded(self.repository.delete(id)).await
  }

  /// Single-field equality lookup. A miss is `NotFound`, not an empty
  /// success.
  pub async fn find_by(&self, key: &str, value: &str) -> Result<E, ServiceError> {
    self.bounded(self.repository.find_by(key, value)).await
  }
}
