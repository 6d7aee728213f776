use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::content::{ContentItem, ContentPatch};
use crate::domain::repository::{Repository, RepositoryError};

/// PostgreSQL implementation of the content item gateway
pub struct PgContentRepository {
  pool: PgPool,
}

impl PgContentRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, FromRow)]
struct ContentRow {
  id: Uuid,
  title: String,
  slug: String,
  description: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<ContentRow> for ContentItem {
  fn from(row: ContentRow) -> Self {
    ContentItem {
      id: row.id,
      title: row.title,
      slug: row.slug,
      description: row.description,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

const SELECT_COLUMNS: &str = "id, title, slug, description, created_at, updated_at";

/// Lookup keys are pinned to static statements; an arbitrary identifier
/// never reaches the SQL text.
fn lookup_statement(key: &str) -> Option<&'static str> {
  match key {
    "slug" => Some(
      "SELECT id, title, slug, description, created_at, updated_at \
       FROM content_items WHERE slug = $1",
    ),
    "title" => Some(
      "SELECT id, title, slug, description, created_at, updated_at \
       FROM content_items WHERE title = $1",
    ),
    "id" => Some(
      "SELECT id, title, slug, description, created_at, updated_at \
       FROM content_items WHERE id::text = $1",
    ),
    _ => None,
  }
}

#[async_trait]
impl Repository<ContentItem> for PgContentRepository {
  async fn create(&self, entity: ContentItem) -> Result<ContentItem, RepositoryError> {
    let row = sqlx::query_as::<_, ContentRow>(&format!(
      r#"
            INSERT INTO content_items (id, title, slug, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SELECT_COLUMNS}
            "#
    ))
    .bind(entity.id)
    .bind(&entity.title)
    .bind(&entity.slug)
    .bind(&entity.description)
    .bind(entity.created_at)
    .bind(entity.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by(&self, key: &str, value: &str) -> Result<ContentItem, RepositoryError> {
    let statement =
      lookup_statement(key).ok_or_else(|| RepositoryError::UnsupportedKey(key.to_string()))?;

    let row = sqlx::query_as::<_, ContentRow>(statement)
      .bind(value)
      .fetch_optional(&self.pool)
      .await?
      .ok_or(RepositoryError::NotFound)?;

    Ok(row.into())
  }

  async fn update(&self, id: Uuid, patch: ContentPatch) -> Result<ContentItem, RepositoryError> {
    // COALESCE keeps the stored value wherever the patch carries None.
    let row = sqlx::query_as::<_, ContentRow>(&format!(
      r#"
            UPDATE content_items
            SET title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                updated_at = COALESCE($5, updated_at)
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
    ))
    .bind(id)
    .bind(patch.title)
    .bind(patch.slug)
    .bind(patch.description)
    .bind(patch.updated_at)
    .fetch_optional(&self.pool)
    .await?
    .ok_or(RepositoryError::NotFound)?;

    Ok(row.into())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound);
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lookup_statement_whitelists_columns() {
    assert!(lookup_statement("slug").is_some());
    assert!(lookup_statement("title").is_some());
    assert!(lookup_statement("id").is_some());
    assert!(lookup_statement("description; DROP TABLE content_items").is_none());
  }
}
