// ============================
// userdir-lib/src/lib.rs
// ============================
//! Core library for the user-directory service: an in-memory user
//! registry with credential-policy validation, an admin-only promotion
//! guard, and the HTTP boundary exposing them.

pub mod auth;
pub mod config;
pub mod contracts;
pub mod error;
pub mod registry;
pub mod router;

use crate::auth::policy::PasswordPolicy;
use crate::config::Settings;
use crate::error::AppError;
use crate::registry::{Role, UserInfo, UserRegistry};

/// Application state shared across all handlers
pub struct AppState {
    /// The user registry (single instance, one lock inside)
    pub registry: UserRegistry,
    /// Settings the state was built from
    pub settings: Settings,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create the application state and seed the configured admin
    /// account through the normal registration path.
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let policy = PasswordPolicy::from_requirements(&settings.password_requirements);
        let registry = UserRegistry::new(policy);

        let seed = &settings.seed_admin;
        registry.register(UserInfo {
            username: seed.username.clone(),
            name: seed.name.clone(),
            birthdate: seed.birthdate,
            role: Role::Admin,
            password: seed.password.clone(),
        })?;

        Ok(AppState { registry, settings })
    }
}
