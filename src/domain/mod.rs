pub mod account;
pub mod content;
pub mod entity;
pub mod repository;
