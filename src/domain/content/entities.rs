use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::Entity;

/// Derives a URL slug from a title: every space becomes a hyphen.
///
/// Pure and deterministic; the slug is recomputed from the title on every
/// create and update and is never settable by a client.
pub fn slugify(title: &str) -> String {
  title.replace(' ', "-")
}

/// Content item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
  /// Unique identifier, assigned at creation and immutable thereafter
  pub id: Uuid,
  pub title: String,
  /// Derived from the title; never independently settable
  pub slug: String,
  pub description: String,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

impl ContentItem {
  /// Creates a new content item from client-supplied fields. Identifier,
  /// slug and timestamps are assigned by `prepare_create`.
  pub fn new(title: String, description: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::nil(),
      slug: String::new(),
      title,
      description,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Partial update payload for a content item.
///
/// `slug` and `updated_at` carry no client input: `prepare_update` fills
/// them from the supplied title and the clock.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
  pub title: Option<String>,
  pub slug: Option<String>,
  pub description: Option<String>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl ContentPatch {
  pub fn new(title: Option<String>, description: Option<String>) -> Self {
    Self {
      title,
      description,
      ..Self::default()
    }
  }
}

impl Entity for ContentItem {
  type Patch = ContentPatch;

  fn prepare_create(&mut self) {
    let now = Utc::now();
    self.id = Uuid::new_v4();
    self.slug = slugify(&self.title);
    self.created_at = now;
    self.updated_at = now;
  }

  fn prepare_update(patch: &mut ContentPatch) {
    patch.slug = patch.title.as_deref().map(slugify);
    patch.updated_at = Some(Utc::now());
  }
}
