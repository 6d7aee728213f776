//! Application layer
//!
//! Use cases that orchestrate domain logic: the generic CRUD service and
//! the per-resource services built on top of it. Every operation here is
//! bound to the configured per-request operation timeout.

pub mod account;
pub mod content;
pub mod crud;

pub use account::{AccountError, AccountService, LoginOutcome};
pub use content::ContentService;
pub use crud::{CrudService, ServiceError};
