pub mod entities;

pub use entities::{ContentItem, ContentPatch, slugify};
