// ============================
// userdir-lib/src/auth/mod.rs
// ============================
//! Credential validation and authorization for the user directory.

pub mod guard;
pub mod policy;

pub use guard::{authenticate, requires_admin, BasicCredentials};
pub use policy::{PasswordPolicy, Predicate};
