pub mod account;
pub mod content;
