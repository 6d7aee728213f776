use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::application::crud::{CrudService, ServiceError};
use crate::domain::content::{ContentItem, ContentPatch};
use crate::domain::repository::Repository;

/// Content item use cases: slug-addressed CRUD over the generic service
pub struct ContentService {
  crud: CrudService<ContentItem>,
}

impl ContentService {
  pub fn new(repository: Arc<dyn Repository<ContentItem>>, operation_timeout: Duration) -> Self {
    Self {
      crud: CrudService::new(repository, operation_timeout),
    }
  }

  /// Stores a new content item. Identifier, slug and timestamps are
  /// assigned by the create hook; client input is title and description
  /// only.
  pub async fn create(&self, title: String, description: String) -> Result<ContentItem, ServiceError> {
    self.crud.create(ContentItem::new(title, description)).await
  }

  /// Applies a partial update. The slug is recomputed from the supplied
  /// title by the update hook; absent fields keep their stored values.
  pub async fn update(
    &self,
    id: Uuid,
    title: Option<String>,
    description: Option<String>,
  ) -> Result<ContentItem, ServiceError> {
    self.crud.update(id, ContentPatch::new(title, description)).await
  }

  pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
    self.crud.delete(id).await
  }

  pub async fn get_by_slug(&self, slug: &str) -> Result<ContentItem, ServiceError> {
    self.crud.find_by("slug", slug).await
  }
}
