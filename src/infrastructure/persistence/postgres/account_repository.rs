use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::account::{Account, AccountPatch};
use crate::domain::repository::{Repository, RepositoryError};

/// PostgreSQL implementation of the account gateway.
///
/// Email uniqueness lives in the schema (unique index); a violation
/// surfaces as `RepositoryError::Duplicate`.
pub struct PgAccountRepository {
  pool: PgPool,
}

impl PgAccountRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, FromRow)]
struct AccountRow {
  id: Uuid,
  name: String,
  email: String,
  password_hash: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
  fn from(row: AccountRow) -> Self {
    Account {
      id: row.id,
      name: row.name,
      email: row.email,
      password_hash: row.password_hash,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

const SELECT_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

fn lookup_statement(key: &str) -> Option<&'static str> {
  match key {
    "email" => Some(
      "SELECT id, name, email, password_hash, created_at, updated_at \
       FROM accounts WHERE email = $1",
    ),
    "name" => Some(
      "SELECT id, name, email, password_hash, created_at, updated_at \
       FROM accounts WHERE name = $1",
    ),
    "id" => Some(
      "SELECT id, name, email, password_hash, created_at, updated_at \
       FROM accounts WHERE id::text = $1",
    ),
    _ => None,
  }
}

#[async_trait]
impl Repository<Account> for PgAccountRepository {
  async fn create(&self, entity: Account) -> Result<Account, RepositoryError> {
    let row = sqlx::query_as::<_, AccountRow>(&format!(
      r#"
            INSERT INTO accounts (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SELECT_COLUMNS}
            "#
    ))
    .bind(entity.id)
    .bind(&entity.name)
    .bind(&entity.email)
    .bind(&entity.password_hash)
    .bind(entity.created_at)
    .bind(entity.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by(&self, key: &str, value: &str) -> Result<Account, RepositoryError> {
    let statement =
      lookup_statement(key).ok_or_else(|| RepositoryError::UnsupportedKey(key.to_string()))?;

    let row = sqlx::query_as::<_, AccountRow>(statement)
      .bind(value)
      .fetch_optional(&self.pool)
      .await?
      .ok_or(RepositoryError::NotFound)?;

    Ok(row.into())
  }

  async fn update(&self, id: Uuid, patch: AccountPatch) -> Result<Account, RepositoryError> {
    let row = sqlx::query_as::<_, AccountRow>(&format!(
      r#"
            UPDATE accounts
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = COALESCE($5, updated_at)
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
    ))
    .bind(id)
    .bind(patch.name)
    .bind(patch.email)
    .bind(patch.password_hash)
    .bind(patch.updated_at)
    .fetch_optional(&self.pool)
    .await?
    .ok_or(RepositoryError::NotFound)?;

    Ok(row.into())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
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
    assert!(lookup_statement("email").is_some());
    assert!(lookup_statement("name").is_some());
    assert!(lookup_statement("id").is_some());
    assert!(lookup_statement("password_hash").is_none());
    assert!(lookup_statement("email = '' OR 1=1 --").is_none());
  }
}
