//! In-memory persistence gateways for the end-to-end pipeline tests.
//!
//! Honor the same contract as the Postgres implementations: `None` patch
//! fields keep the stored value, lookups miss with `NotFound`, duplicate
//! emails surface as `Duplicate`.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use inkpress::domain::account::{Account, AccountPatch};
use inkpress::domain::content::{ContentItem, ContentPatch};
use inkpress::domain::repository::{Repository, RepositoryError};

#[derive(Default)]
pub struct MemoryContentRepository {
  items: Mutex<Vec<ContentItem>>,
  delay: Option<Duration>,
}

impl MemoryContentRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// A gateway that stalls every call, for deadline tests
  pub fn with_delay(delay: Duration) -> Self {
    Self {
      items: Mutex::new(Vec::new()),
      delay: Some(delay),
    }
  }

  async fn stall(&self) {
    if let Some(delay) = self.delay {
      tokio::time::sleep(delay).await;
    }
  }
}

#[async_trait]
impl Repository<ContentItem> for MemoryContentRepository {
  async fn create(&self, entity: ContentItem) -> Result<ContentItem, RepositoryError> {
    self.stall().await;
    self.items.lock().unwrap().push(entity.clone());
    Ok(entity)
  }

  async fn find_by(&self, key: &str, value: &str) -> Result<ContentItem, RepositoryError> {
    self.stall().await;
    let items = self.items.lock().unwrap();
    items
      .iter()
      .find(|item| match key {
        "slug" => item.slug == value,
        "title" => item.title == value,
        "id" => item.id.to_string() == value,
        _ => false,
      })
      .cloned()
      .ok_or(RepositoryError::NotFound)
  }

  async fn update(&self, id: Uuid, patch: ContentPatch) -> Result<ContentItem, RepositoryError> {
    self.stall().await;
    let mut items = self.items.lock().unwrap();
    let item = items
      .iter_mut()
      .find(|item| item.id == id)
      .ok_or(RepositoryError::NotFound)?;
    if let Some(title) = patch.title {
      item.title = title;
    }
    if let Some(slug) = patch.slug {
      item.slug = slug;
    }
    if let Some(description) = patch.description {
      item.description = description;
    }
    if let Some(updated_at) = patch.updated_at {
      item.updated_at = updated_at;
    }
    Ok(item.clone())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    self.stall().await;
    let mut items = self.items.lock().unwrap();
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() == before {
      return Err(RepositoryError::NotFound);
    }
    Ok(())
  }
}

#[derive(Default)]
pub struct MemoryAccountRepository {
  accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl Repository<Account> for MemoryAccountRepository {
  async fn create(&self, entity: Account) -> Result<Account, RepositoryError> {
    let mut accounts = self.accounts.lock().unwrap();
    if accounts.iter().any(|a| a.email == entity.email) {
      return Err(RepositoryError::Duplicate(format!(
        "email {} already registered",
        entity.email
      )));
    }
    accounts.push(entity.clone());
    Ok(entity)
  }

  async fn find_by(&self, key: &str, value: &str) -> Result<Account, RepositoryError> {
    let accounts = self.accounts.lock().unwrap();
    accounts
      .iter()
      .find(|a| match key {
        "email" => a.email == value,
        "name" => a.name == value,
        "id" => a.id.to_string() == value,
        _ => false,
      })
      .cloned()
      .ok_or(RepositoryError::NotFound)
  }

  async fn update(&self, id: Uuid, patch: AccountPatch) -> Result<Account, RepositoryError> {
    let mut accounts = self.accounts.lock().unwrap();
    let account = accounts
      .iter_mut()
      .find(|a| a.id == id)
      .ok_or(RepositoryError::NotFound)?;
    if let Some(name) = patch.name {
      account.name = name;
    }
    if let Some(email) = patch.email {
      account.email = email;
    }
    if let Some(hash) = patch.password_hash {
      account.password_hash = hash;
    }
    if let Some(updated_at) = patch.updated_at {
      account.updated_at = updated_at;
    }
    Ok(account.clone())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    let mut accounts = self.accounts.lock().unwrap();
    let before = accounts.len();
    accounts.retain(|a| a.id != id);
    if accounts.len() == before {
      return Err(RepositoryError::NotFound);
    }
    Ok(())
  }
}
