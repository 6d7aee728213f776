//! inkpress — content & account backend with stateless bearer-token auth
//!
//! Hexagonal layout: `domain` holds entities, ports and business rules;
//! `application` the use cases; `adapters::http` the delivery layer and
//! request pipeline; `infrastructure` the Postgres, crypto and config
//! collaborators.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
