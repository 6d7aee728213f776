pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::{Account, AccountClaim, AccountPatch, Credential};
pub use errors::AuthError;
pub use ports::{Claims, IssuedToken, PasswordHasher, TokenService};
pub use value_objects::{Email, Password, PasswordHash};
